//! Data Transfer Objects - request/response types for the item catalog API.

use serde::{Deserialize, Serialize};

/// Request to add an item to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

/// An item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: u64,
    pub name: String,
}
