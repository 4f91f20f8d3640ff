//! The seam between the grammar and whatever turns statements into output

use std::collections::BTreeMap;

/// Property name to value, in key order
pub type Properties = BTreeMap<String, String>;

/// Receives one call per recognised tag statement.
///
/// Any tag name may come through; implementations decide what it means.
pub trait Builder {
    type Node;

    fn invoke(&mut self, tag_name: &str, properties: Properties) -> Self::Node;
}
