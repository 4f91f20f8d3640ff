mod compiler;

pub use compiler::{compile_to_html, compile_to_json, CompileError, Element, HtmlBuilder};

#[cfg(test)]
mod tests;
