//! Output types for the front end.
//!
//! These structs are serialized to JSON and handed to the page, which drops each
//! `StyledName` into an absolutely positioned span.

use serde::Serialize;

use crate::layout::PlacedName;

/// Base CSS class shared by every name.
const BASE_CLASS: &str = "name";

/// Inline style for one name. Values are ready-to-use CSS strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameStyle {
    pub top: String,
    pub left: String,
    pub width: String,
    pub height: String,
    pub font_size: String,
    /// Positions are box centers, so the span is pulled back by half its size.
    pub transform: String,
    pub color: String,
    pub text_shadow: String,
}

/// A placed name ready for the page to display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledName {
    pub name: String,
    pub class_name: String,
    pub style: NameStyle,
}

impl From<&PlacedName> for StyledName {
    fn from(p: &PlacedName) -> Self {
        StyledName {
            name: p.name.clone(),
            class_name: css_class_name(&p.name),
            style: NameStyle {
                top: px(p.y),
                left: px(p.x),
                width: px(p.width),
                height: px(p.height),
                font_size: px(p.font_size),
                transform: "translate(-50%, -50%)".to_string(),
                color: p.color.color.clone(),
                text_shadow: p.color.text_shadow(),
            },
        }
    }
}

/// Error information for the page's console / overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output sent to the page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CloudOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<StyledName>,
    /// Names that were requested but could not be fitted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl CloudOutput {
    /// Styled records for `placed`, plus whichever of `requested` did not make it.
    pub fn from_layout<S: AsRef<str>>(requested: &[S], placed: &[PlacedName]) -> Self {
        let mut placed_iter = placed.iter().peekable();
        let mut dropped = Vec::new();
        for (rank, name) in requested.iter().enumerate() {
            if placed_iter.next_if(|p| p.rank == rank).is_none() {
                dropped.push(name.as_ref().to_string());
            }
        }

        CloudOutput {
            names: placed.iter().map(StyledName::from).collect(),
            dropped,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        CloudOutput {
            error: Some(ErrorInfo { message: message.into() }),
            ..CloudOutput::default()
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":{"message":"Serialization error"}}"#.to_string())
    }
}

/// `"name kyrie-elijah"` for `"Kyrie Elijah"`: lowercased, whitespace runs become `-`.
pub fn css_class_name(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{BASE_CLASS} {slug}")
}

fn px(v: f64) -> String {
    format!("{v}px")
}
