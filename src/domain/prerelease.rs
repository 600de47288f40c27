//! Pre-release suffix of a release tag
//!
//! Only the restricted form used for image tagging is recognised: one or more
//! ASCII letters, optionally followed by `.` and a digit sequence
//! (`alpha`, `beta.1`, `RC.11`).

use std::fmt;

/// Pre-release segment such as `alpha.1`
///
/// The identifier keeps its original case and the iteration keeps its original
/// digits, so formatting reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub identifier: String,
    pub iteration: Option<String>,
}

impl PreRelease {
    /// Parse a pre-release segment (without the leading `-`)
    ///
    /// # Returns
    /// * `Some(PreRelease)` - segment matches `letters(.digits)?`
    /// * `None` - anything else
    pub fn parse(s: &str) -> Option<Self> {
        let (identifier, iteration) = match s.split_once('.') {
            Some((identifier, iteration)) => (identifier, Some(iteration)),
            None => (s, None),
        };

        if !is_letters(identifier) {
            return None;
        }

        if let Some(iteration) = iteration {
            if !is_digits(iteration) {
                return None;
            }
        }

        Some(PreRelease {
            identifier: identifier.to_string(),
            iteration: iteration.map(str::to_string),
        })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.iteration {
            Some(iteration) => write!(f, "{}.{}", self.identifier, iteration),
            None => write!(f, "{}", self.identifier),
        }
    }
}

/// Non-empty run of ASCII digits
pub(crate) fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_letters(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}
