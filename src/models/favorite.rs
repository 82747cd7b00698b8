//! Favorite model and its builder

use serde::{Deserialize, Serialize};

/// A user-saved place: human-readable address plus the places API identifier
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Assigned by the store on first save
    pub id: Option<u64>,
    /// Formatted address shown to the user
    pub address: String,
    /// Opaque places API key used to look up coordinates
    pub place_id: String,
}

impl Favorite {
    #[must_use]
    pub fn builder() -> FavoriteBuilder {
        FavoriteBuilder::default()
    }

    pub fn set_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

/// Builder for [`Favorite`]
#[derive(Debug, Default, Clone)]
pub struct FavoriteBuilder {
    id: Option<u64>,
    address: String,
    place_id: String,
}

impl FavoriteBuilder {
    /// Start a builder for an already persisted favorite
    #[must_use]
    pub fn with_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    #[must_use]
    pub fn place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = place_id.into();
        self
    }

    #[must_use]
    pub fn build(self) -> Favorite {
        Favorite {
            id: self.id,
            address: self.address,
            place_id: self.place_id,
        }
    }
}
