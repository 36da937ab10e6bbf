//! Request validation: per-kind value validators plus the payload parsers
//! that normalize raw JSON bodies before anything touches the database.

use serde::Serialize;

pub mod domain;
pub mod ip;
pub mod url;

mod payload;

pub use payload::{
    parse_rule_payload, parse_update_payload, KindUpdate, RulePayload, UpdatePayload,
};

/// One field-level violation, echoed back to the client on a 400.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A violation that is not yet tied to a field path. Validators produce these;
/// the payload parser attaches the path of the offending field.
#[derive(Debug, Clone)]
pub struct ItemError {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ItemError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn wrong_type(what: &str, expected: &str) -> Self {
        Self::new("E000", format!("{} must be {}", what, expected))
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn at(self, field: impl Into<String>) -> ValidationError {
        ValidationError {
            code: self.code,
            message: self.message,
            field: field.into(),
            suggestion: self.suggestion,
        }
    }
}

pub trait Validator {
    fn validate(&self, input: &str) -> Result<(), ItemError>;
}
