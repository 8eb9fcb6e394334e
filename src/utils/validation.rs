use crate::utils::error::{FunnelError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FunnelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FunnelError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FunnelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FunnelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects values still holding an unresolved `${VAR}` reference.
pub fn validate_no_placeholder(field_name: &str, value: &str) -> Result<()> {
    if let Some(start) = value.find("${") {
        let name = value[start + 2..].split('}').next().unwrap_or_default();
        return Err(FunnelError::MissingConfigError {
            field: format!("{} (environment variable {} is not set)", field_name, name),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FunnelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("store.url", "https://example.supabase.co").is_ok());
        assert!(validate_url("store.url", "http://localhost:54321").is_ok());
        assert!(validate_url("store.url", "").is_err());
        assert!(validate_url("store.url", "invalid-url").is_err());
        assert!(validate_url("store.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_no_placeholder() {
        assert!(validate_no_placeholder("store.anon_key", "abc").is_ok());
        let err = validate_no_placeholder("store.anon_key", "${SUPABASE_ANON_KEY}").unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("store.timeout_seconds", 10u64, 1, 120).is_ok());
        assert!(validate_range("store.timeout_seconds", 0u64, 1, 120).is_err());
    }
}
