use super::{ItemError, Validator};

/// Validates fully qualified URLs. Bare domains are handled by
/// [`DomainValidator`](super::domain::DomainValidator) instead.
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn validate(&self, input: &str) -> Result<(), ItemError> {
        let s = input.trim();

        // E010: Empty URL
        if s.is_empty() {
            return Err(ItemError::new("E010", "URL cannot be empty")
                .suggest("Provide a URL like https://example.com or a bare domain"));
        }

        // E011: Unparseable URL
        let parsed = url::Url::parse(s).map_err(|e| {
            ItemError::new("E011", format!("Invalid URL '{}': {}", s, e))
                .suggest("Use a fully qualified URL like https://example.com/path")
        })?;

        // E012: Only http/https rules make sense for the firewall
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ItemError::new(
                    "E012",
                    format!("URL scheme '{}' is not allowed", other),
                )
                .suggest("Use http or https"));
            }
        }

        // E011: Scheme without a host (e.g. "http://")
        if parsed.host_str().is_none() {
            return Err(ItemError::new("E011", format!("URL '{}' has no host", s))
                .suggest("Include a hostname, e.g. https://example.com"));
        }

        Ok(())
    }
}
