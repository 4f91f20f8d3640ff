use clean_parser::{parse, Builder, ParseError, Properties};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A markup element produced by one tag statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag_name: String,
    pub properties: Properties,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>, properties: Properties) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties,
            children: Vec::new(),
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn to_html(&self) -> String {
        let mut buffer = String::new();
        self.write_html(&mut buffer);
        buffer
    }

    fn write_html(&self, buffer: &mut String) {
        buffer.push('<');
        buffer.push_str(&self.tag_name);

        // Values go out as written; the grammar never yields a quote inside one
        for (name, value) in &self.properties {
            buffer.push_str(&format!(" {}='{}'", name, value));
        }
        buffer.push('>');

        for child in &self.children {
            child.write_html(buffer);
        }

        buffer.push_str(&format!("</{}>", self.tag_name));
    }
}

/// Builder that turns every invocation into an [`Element`] and keeps them all
#[derive(Debug, Clone, Default)]
pub struct HtmlBuilder {
    elements: Vec<Element>,
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every element built so far, in invocation order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn to_html(&self) -> String {
        self.elements.iter().map(Element::to_html).collect()
    }
}

impl Builder for HtmlBuilder {
    type Node = Element;

    fn invoke(&mut self, tag_name: &str, properties: Properties) -> Element {
        let element = Element::new(tag_name, properties);
        debug!(tag_name, "built element");
        self.elements.push(element.clone());
        element
    }
}

/// Compile one Clean statement to HTML
pub fn compile_to_html(source: &str) -> Result<String, CompileError> {
    let mut builder = HtmlBuilder::new();
    let element = parse(source, &mut builder)?;
    Ok(element.to_html())
}

/// Compile one Clean statement to the JSON form of its element
pub fn compile_to_json(source: &str) -> Result<String, CompileError> {
    let mut builder = HtmlBuilder::new();
    let element = parse(source, &mut builder)?;
    Ok(serde_json::to_string_pretty(&element)?)
}
