use std::fmt;

use crate::dao::models::ParticipantId;

/// Prefix shared by every participant code.
pub const CODE_PREFIX: &str = "USER";
const MIN_DIGITS: usize = 3;

/// Public identifier of a participant: [`CODE_PREFIX`] followed by the
/// zero-padded id (`USER007`, `USER1234`).
///
/// This is the only participant-identifying value ever shown in chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayCode(String);

impl DisplayCode {
    /// Code for a participant id, e.g. `USER001` for 1.
    pub fn from_id(id: ParticipantId) -> Self {
        Self(format!("{CODE_PREFIX}{id:0width$}", width = MIN_DIGITS))
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_three_digits() {
        assert_eq!(DisplayCode::from_id(1).as_str(), "USER001");
        assert_eq!(DisplayCode::from_id(42).as_str(), "USER042");
        assert_eq!(DisplayCode::from_id(999).as_str(), "USER999");
    }

    #[test]
    fn widens_past_three_digits() {
        assert_eq!(DisplayCode::from_id(1000).as_str(), "USER1000");
        assert_eq!(DisplayCode::from_id(123456).to_string(), "USER123456");
    }
}
