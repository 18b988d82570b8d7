//! Title validation shared by lists and items

use super::ValidationError;

/// Maximum length for list and item titles
const MAX_TITLE_LEN: usize = 255;

/// Maximum length for descriptions
pub(crate) const MAX_DESCRIPTION_LEN: usize = 4096;

/// Validated list or item title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// Create a new title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::Title;
    ///
    /// assert!(Title::new("Groceries").is_ok());
    /// assert!(Title::new("").is_err());
    /// assert!(Title::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check a description against the length limit. Empty is allowed.
pub(crate) fn check_description(s: &str) -> Result<(), ValidationError> {
    if s.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description",
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}
