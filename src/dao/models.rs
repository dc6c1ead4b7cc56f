//! Persisted entities shared by every participant store backend.

/// Identifier assigned by the store when a participant is first inserted.
///
/// Backed by a PostgreSQL `SERIAL` column, hence the 32-bit width.
pub type ParticipantId = i32;

/// One row of the `participants` table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "postgres-store", derive(sqlx::FromRow))]
pub struct ParticipantEntity {
    /// Store-assigned id, source of the display code.
    pub id: ParticipantId,
    /// Registered email, trimmed.
    pub email: String,
}

impl ParticipantEntity {
    /// Build an entity from its parts.
    pub fn new(id: ParticipantId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
