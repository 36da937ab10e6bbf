use super::{ItemError, Validator};

pub struct DomainValidator;

impl DomainValidator {
    fn is_valid_label_char(c: char) -> bool {
        c.is_alphanumeric() || c == '-'
    }
}

impl Validator for DomainValidator {
    fn validate(&self, input: &str) -> Result<(), ItemError> {
        let s = input.trim();

        // E001: Empty domain
        if s.is_empty() {
            return Err(ItemError::new("E001", "Domain cannot be empty")
                .suggest("Provide a valid domain like example.com"));
        }

        // E002: Domain too long (RFC 1035)
        if s.len() > 253 {
            return Err(ItemError::new(
                "E002",
                format!("Domain exceeds 253 characters (got {})", s.len()),
            )
            .suggest("Use a shorter domain name"));
        }

        // Trailing dot is legal in DNS, ignore it for label checks
        let domain = s.trim_end_matches('.');
        let labels: Vec<&str> = domain.split('.').collect();

        for label in &labels {
            // E003: Invalid label length
            if label.is_empty() {
                return Err(ItemError::new("E003", "Domain contains empty label")
                    .suggest("Ensure domain has no consecutive dots"));
            }
            if label.len() > 63 {
                return Err(ItemError::new(
                    "E003",
                    format!("Label '{}' exceeds 63 characters", label),
                )
                .suggest("Use shorter labels in the domain"));
            }

            // E004: Invalid characters in label
            if !label.chars().all(Self::is_valid_label_char) {
                return Err(ItemError::new(
                    "E004",
                    format!("Label '{}' contains invalid characters", label),
                )
                .suggest("Labels can only contain letters, digits, and hyphens"));
            }

            // E005: Label cannot start or end with hyphen
            if label.starts_with('-') || label.ends_with('-') {
                return Err(ItemError::new(
                    "E005",
                    format!("Label '{}' cannot start or end with hyphen", label),
                )
                .suggest("Remove leading/trailing hyphens"));
            }
        }

        // At least 2 labels (e.g., example.com)
        if labels.len() < 2 {
            return Err(ItemError::new(
                "E004",
                "Domain must have at least 2 labels (e.g., example.com)",
            )
            .suggest("Use a fully qualified domain name"));
        }

        Ok(())
    }
}
