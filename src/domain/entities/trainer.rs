//! Trainers as the backend reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub is_active: bool,
    /// Number of members currently assigned; omitted by some endpoints.
    #[serde(default)]
    pub member_count: Option<u32>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

impl Trainer {
    /// Comma-joined specialties for table cells.
    pub fn specialties_label(&self) -> String {
        self.specialties.join(", ")
    }
}
