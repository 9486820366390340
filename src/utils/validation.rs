use crate::utils::error::{HomestayError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HomestayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HomestayError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HomestayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min_value {
        return Err(HomestayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| HomestayError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Money amounts: finite and not negative. `nan` and `inf` are valid TOML floats.
pub fn validate_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HomestayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    validate_positive_number(field_name, value, 0.0)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HomestayError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(HomestayError::InvalidConfigValueError {
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
        assert!(validate_url("ai.endpoint", "https://example.com").is_ok());
        assert!(validate_url("ai.endpoint", "http://127.0.0.1:8080/v1beta").is_ok());
        assert!(validate_url("ai.endpoint", "").is_err());
        assert!(validate_url("ai.endpoint", "invalid-url").is_err());
        assert!(validate_url("ai.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("booking.default_nights", 5u32, 1).is_ok());
        assert!(validate_positive_number("booking.default_nights", 0u32, 1).is_err());
        assert!(validate_positive_number("booking.cleaning_fee", -1.0, 0.0).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount("booking.cleaning_fee", 0.0).is_ok());
        assert!(validate_amount("booking.cleaning_fee", 85.0).is_ok());
        assert!(validate_amount("booking.cleaning_fee", -1.0).is_err());
        assert!(validate_amount("booking.cleaning_fee", f64::NAN).is_err());
        assert!(validate_amount("booking.service_fee", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("ai.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("ai.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("ai.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_required_and_non_empty() {
        let key: Option<String> = None;
        assert!(matches!(
            validate_required_field("ai.api_key", &key),
            Err(HomestayError::MissingConfigError { .. })
        ));
        assert!(validate_non_empty_string("title", "   ").is_err());
        assert!(validate_non_empty_string("title", "Beach hut").is_ok());
    }
}
