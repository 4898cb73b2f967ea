//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Author record. Authors are reference data: books point at them, the
/// catalog never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            family_name: family_name.into(),
        }
    }

    /// Display name, "Family, First"
    pub fn name(&self) -> String {
        match (self.family_name.is_empty(), self.first_name.is_empty()) {
            (false, false) => format!("{}, {}", self.family_name, self.first_name),
            (false, true) => self.family_name.clone(),
            (true, _) => self.first_name.clone(),
        }
    }
}
