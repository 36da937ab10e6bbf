//! The rule-kind abstraction shared by validation, persistence, and routing.
//!
//! IP, URL, and port rules behave identically except for their table, their
//! value type, and how a raw JSON item is validated. Everything downstream is
//! generic over [`RuleKind`] so the CRUD logic exists exactly once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{domain::DomainValidator, ip::IpValidator, url::UrlValidator};
use crate::validation::{ItemError, Validator};

/// Classification of a rule: deny (blacklist) or allow (whitelist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Blacklist,
    Whitelist,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Blacklist => "blacklist",
            Mode::Whitelist => "whitelist",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blacklist" => Ok(Mode::Blacklist),
            "whitelist" => Ok(Mode::Whitelist),
            _ => Err(()),
        }
    }
}

/// One firewall rule kind: its storage location, its value type, and how a
/// raw JSON item becomes a storable value.
pub trait RuleKind: Send + Sync + 'static {
    /// Kind label used in responses and accepted as the payload field alias.
    const KIND: &'static str;
    const TABLE: &'static str;
    const COLUMN: &'static str;

    type Value: sqlx::Type<sqlx::Sqlite>
        + for<'q> sqlx::Encode<'q, sqlx::Sqlite>
        + for<'r> sqlx::Decode<'r, sqlx::Sqlite>
        + Serialize
        + Clone
        + Send
        + Sync
        + Unpin
        + 'static;

    /// Validate one raw JSON item and convert it to the storable value.
    fn parse_item(raw: &Value) -> Result<Self::Value, ItemError>;
}

pub struct Ip;

impl RuleKind for Ip {
    const KIND: &'static str = "ip";
    const TABLE: &'static str = "ip_rules";
    const COLUMN: &'static str = "ip";

    type Value = String;

    fn parse_item(raw: &Value) -> Result<String, ItemError> {
        let s = raw
            .as_str()
            .ok_or_else(|| ItemError::wrong_type("IP address", "a string"))?;
        IpValidator.validate(s)?;
        Ok(s.trim().to_string())
    }
}

pub struct Url;

impl RuleKind for Url {
    const KIND: &'static str = "url";
    const TABLE: &'static str = "url_rules";
    const COLUMN: &'static str = "url";

    type Value = String;

    fn parse_item(raw: &Value) -> Result<String, ItemError> {
        let s = raw
            .as_str()
            .ok_or_else(|| ItemError::wrong_type("URL", "a string"))?;
        // Full URLs carry a scheme; everything else is treated as a bare domain.
        if s.contains("://") {
            UrlValidator.validate(s)?;
        } else {
            DomainValidator.validate(s)?;
        }
        Ok(s.trim().to_string())
    }
}

pub struct Port;

impl RuleKind for Port {
    const KIND: &'static str = "port";
    const TABLE: &'static str = "port_rules";
    const COLUMN: &'static str = "port";

    type Value = i64;

    fn parse_item(raw: &Value) -> Result<i64, ItemError> {
        let n = raw
            .as_i64()
            .ok_or_else(|| ItemError::wrong_type("Port", "an integer"))?;
        if !(1..=65535).contains(&n) {
            return Err(ItemError::new(
                "E021",
                format!("Port {} is out of range", n),
            )
            .suggest("Use a port between 1 and 65535"));
        }
        Ok(n)
    }
}
