use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Managed category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::domain::offer::timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
}

/// Data required to create or rename a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `GET /categories`: distinct category names used by offers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryNames {
    #[serde(default)]
    pub categories: Vec<String>,
}
