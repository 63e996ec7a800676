//! Declarative element descriptions.
//!
//! # Invariants
//! - Keys are held in sorted order; application order does not change the
//!   resulting node.
//! - `textContent` and `className` are the only keys with special meaning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key that sets node text.
pub const TEXT_CONTENT_KEY: &str = "textContent";
/// Attribute key that sets the node's class string.
pub const CLASS_NAME_KEY: &str = "className";

/// Declarative attribute map for `create_element`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementAttributes {
    entries: BTreeMap<String, String>,
}

/// One attribute assignment after key classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeAssignment<'a> {
    Text(&'a str),
    ClassName(&'a str),
    Generic { name: &'a str, value: &'a str },
}

impl ElementAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.attr(TEXT_CONTENT_KEY, value)
    }

    pub fn class_name(self, value: impl Into<String>) -> Self {
        self.attr(CLASS_NAME_KEY, value)
    }

    /// Sets one key; a repeated key keeps the last value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classified assignments in key order.
    pub fn assignments(&self) -> impl Iterator<Item = AttributeAssignment<'_>> {
        self.entries
            .iter()
            .map(|(name, value)| match name.as_str() {
                TEXT_CONTENT_KEY => AttributeAssignment::Text(value),
                CLASS_NAME_KEY => AttributeAssignment::ClassName(value),
                other => AttributeAssignment::Generic { name: other, value },
            })
    }
}

impl<K, V> FromIterator<(K, V)> for ElementAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeAssignment, ElementAttributes};

    #[test]
    fn classifies_special_keys() {
        let attributes = ElementAttributes::new()
            .text("hello")
            .class_name("greeting")
            .attr("data-kind", "demo");

        let assignments = attributes.assignments().collect::<Vec<_>>();
        assert_eq!(
            assignments,
            vec![
                AttributeAssignment::ClassName("greeting"),
                AttributeAssignment::Generic {
                    name: "data-kind",
                    value: "demo"
                },
                AttributeAssignment::Text("hello"),
            ]
        );
    }

    #[test]
    fn deserializes_from_plain_json_object() {
        let attributes: ElementAttributes =
            serde_json::from_str(r#"{"textContent":"x","title":"tip"}"#).expect("valid map");
        assert_eq!(attributes.get("textContent"), Some("x"));
        assert_eq!(attributes.get("title"), Some("tip"));
        assert_eq!(attributes.len(), 2);
    }
}
