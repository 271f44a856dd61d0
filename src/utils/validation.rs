use crate::utils::error::{BuilderError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BuilderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BuilderError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BuilderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BuilderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Data ids end up as a path segment, so separators are rejected.
pub fn validate_path_segment(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains('/') || value.contains('?') || value.contains('#') {
        return Err(BuilderError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot contain '/', '?' or '#'".to_string(),
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
        return Err(BuilderError::InvalidConfigValueError {
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
        assert!(validate_url("service.base_url", "https://example.com").is_ok());
        assert!(validate_url("service.base_url", "http://localhost:40000").is_ok());
        assert!(validate_url("service.base_url", "").is_err());
        assert!(validate_url("service.base_url", "invalid-url").is_err());
        assert!(validate_url("service.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path_segment() {
        assert!(validate_path_segment("service.data_id", "1").is_ok());
        assert!(validate_path_segment("service.data_id", "").is_err());
        assert!(validate_path_segment("service.data_id", "1/2").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("service.timeout_seconds", 30, 1, 3600).is_ok());
        assert!(validate_range("service.timeout_seconds", 0, 1, 3600).is_err());
    }
}
