use super::{ItemError, Validator};

pub struct IpValidator;

impl Validator for IpValidator {
    fn validate(&self, input: &str) -> Result<(), ItemError> {
        let s = input.trim();

        // E006: Empty IP
        if s.is_empty() {
            return Err(ItemError::new("E006", "IP address cannot be empty")
                .suggest("Provide a valid IPv4 or IPv6 address"));
        }

        if s.parse::<std::net::Ipv4Addr>().is_ok() || s.parse::<std::net::Ipv6Addr>().is_ok() {
            return Ok(());
        }

        // E007: Invalid IP format
        Err(
            ItemError::new("E007", format!("Invalid IP address format: {}", s))
                .suggest("Use IPv4 (e.g., 192.168.1.1) or IPv6 (e.g., 2001:db8::1)"),
        )
    }
}
