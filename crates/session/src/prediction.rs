//! Display-facing prediction state

use std::fmt;

/// Largest digit a backend may report
pub const MAX_DIGIT: u8 = 9;

/// What the display should show for the last backend reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prediction {
    /// Nothing received since start or the last clear
    #[default]
    None,
    /// A digit 0-9
    Digit(u8),
    /// The backend reported a value outside 0-9
    Invalid(u8),
}

impl Prediction {
    /// Classify a raw backend value
    pub fn from_raw(raw: Option<u8>) -> Self {
        match raw {
            None => Self::None,
            Some(digit) if digit <= MAX_DIGIT => Self::Digit(digit),
            Some(value) => Self::Invalid(value),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("-"),
            Self::Digit(digit) => write!(f, "{digit}"),
            Self::Invalid(_) => f.write_str("Error"),
        }
    }
}
