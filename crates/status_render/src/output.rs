use serde::{Deserialize, Serialize};

/// The css class hook of a module. Waybar accepts either a single class or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssClass {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for CssClass {
    fn from(s: &str) -> Self {
        CssClass::Single(s.to_string())
    }
}

impl From<Vec<String>> for CssClass {
    fn from(classes: Vec<String>) -> Self {
        CssClass::Many(classes)
    }
}

/// One line of output for a custom module with `return-type: json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedStatus {
    pub text: String,
    pub tooltip: String,
    pub class: CssClass,
}

impl RenderedStatus {
    pub fn new(text: impl Into<String>, tooltip: impl Into<String>, class: impl Into<CssClass>) -> Self {
        RenderedStatus { text: text.into(), tooltip: tooltip.into(), class: class.into() }
    }
}
