use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppError, AppResult};

/// Player identifier used as the primary key of membership records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Creates a random player identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a player identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Parses a transport value into a player identifier.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| AppError::Validation(format!("invalid player id {value}")))
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PlayerId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for PlayerId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;
    use crate::AppError;

    #[test]
    fn player_id_formats_as_uuid() {
        let player_id = PlayerId::new();
        assert_eq!(player_id.to_string().len(), 36);
    }

    #[test]
    fn player_id_parses_its_own_display_value() {
        let player_id = PlayerId::new();
        let parsed = PlayerId::parse(player_id.to_string().as_str());
        assert!(matches!(parsed, Ok(value) if value == player_id));
    }

    #[test]
    fn malformed_player_id_is_a_validation_error() {
        let parsed = PlayerId::parse("not-a-uuid");
        assert!(matches!(parsed, Err(AppError::Validation(_))));
    }
}
