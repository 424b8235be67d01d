//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Minimum username length.
const MIN_LENGTH: usize = 3;
/// Maximum username length.
const MAX_LENGTH: usize = 32;

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("username cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("username must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a disallowed character.
    #[error("username may only contain letters, digits, '-' and '_'")]
    InvalidCharacter,
}

/// A registered user's login name.
///
/// Usernames identify accounts and are matched case-sensitively and exactly:
/// `"Ash"` and `"ash"` are two different accounts. Validation is purely
/// structural; uniqueness is enforced by the store.
///
/// ## Constraints
///
/// - Length: 3-32 characters
/// - ASCII letters, digits, `-` and `_` only
///
/// ## Examples
///
/// ```
/// use poke_explorer_core::Username;
///
/// assert!(Username::parse("ash").is_ok());
/// assert!(Username::parse("misty_1998").is_ok());
///
/// assert!(Username::parse("").is_err());        // empty
/// assert!(Username::parse("ab").is_err());      // too short
/// assert!(Username::parse("team rocket").is_err()); // space
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Parse and validate a username.
    ///
    /// # Errors
    ///
    /// Returns a [`UsernameError`] describing the first violated constraint.
    pub fn parse(input: &str) -> Result<Self, UsernameError> {
        if input.is_empty() {
            return Err(UsernameError::Empty);
        }
        if input.len() < MIN_LENGTH {
            return Err(UsernameError::TooShort { min: MIN_LENGTH });
        }
        if input.len() > MAX_LENGTH {
            return Err(UsernameError::TooLong { max: MAX_LENGTH });
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(input.to_owned()))
    }

    /// Get the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
