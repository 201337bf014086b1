use thiserror::Error;
use validator::Validate;

/// Longest option text accepted by the add-option form
pub const MAX_OPTION_LEN: usize = 100;

/// Why an "add option" submission was held back
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionRejection {
    #[error("Please enter a valid option")]
    Empty,

    #[error("Option text is too long (max {max} characters)")]
    TooLong { max: usize },
}

#[derive(Debug, Validate)]
struct NewOption {
    #[validate(length(min = 1, max = 100))]
    text: String,
}

/// Gate for the add-option form: trims, then enforces 1..=100 characters
pub fn validate_new_option(raw: &str) -> Result<String, OptionRejection> {
    let candidate = NewOption {
        text: raw.trim().to_string(),
    };

    match candidate.validate() {
        Ok(()) => Ok(candidate.text),
        Err(_) if candidate.text.is_empty() => Err(OptionRejection::Empty),
        Err(errors) => {
            tracing::debug!("Rejected option text: {}", errors);
            Err(OptionRejection::TooLong { max: MAX_OPTION_LEN })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_text_accepted() {
        assert_eq!(validate_new_option("  Tacos El Güero "), Ok("Tacos El Güero".to_string()));
    }

    #[test]
    fn test_blank_rejected() {
        assert_eq!(validate_new_option("   "), Err(OptionRejection::Empty));
        assert_eq!(validate_new_option(""), Err(OptionRejection::Empty));
    }

    #[test]
    fn test_length_boundary() {
        assert!(validate_new_option(&"a".repeat(100)).is_ok());
        assert_eq!(
            validate_new_option(&"a".repeat(101)),
            Err(OptionRejection::TooLong { max: 100 })
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(OptionRejection::Empty.to_string(), "Please enter a valid option");
        assert_eq!(
            OptionRejection::TooLong { max: 100 }.to_string(),
            "Option text is too long (max 100 characters)"
        );
    }
}
