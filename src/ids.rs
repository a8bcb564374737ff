use serde::{Deserialize, Serialize};

/// Physical card-print identifier, references one record in the card corpus.
///
/// Ids are the only stable cross-reference key: display names are shared by
/// reprints and by ex/base variant pairs, ids never are.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a specific value (ids come from the manual data store).
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
