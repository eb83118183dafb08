//! Shop entity - A location that stocks records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ShopId;

/// Maximum length for shop names
const MAX_NAME_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for a shop that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopDraft {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl ShopDraft {
    /// Create a validated shop draft.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or longer
    /// than 200 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Shop name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Shop name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self {
            name: trimmed.to_string(),
            address: None,
        })
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        self.address = Some(address.trim().to_string()).filter(|a| !a.is_empty());
        self
    }
}

impl Shop {
    pub fn from_draft(id: ShopId, draft: ShopDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            created_at,
        }
    }
}
