use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AdImageUrl, AdLinkUrl, AdLocation, AdTitle, AdvertisementId};

/// Where an advertisement is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdPlacement {
    pub location: AdLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Advertisement record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Advertisement {
    pub id: AdvertisementId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    pub link_url: String,
    pub placement: AdPlacement,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, with = "crate::domain::offer::timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::domain::offer::timestamp::option")]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

/// Payload for creating or fully replacing an advertisement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAdvertisement {
    pub title: AdTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: AdImageUrl,
    pub link_url: AdLinkUrl,
    pub placement: AdPlacement,
    pub is_active: bool,
}

/// Partial update that only flips the active flag.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AdvertisementActivePatch {
    pub is_active: bool,
}

/// Options for `GET /advertisements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvertisementQuery {
    pub location: Option<AdLocation>,
    pub active_only: bool,
}

impl AdvertisementQuery {
    /// Every advertisement regardless of state, for management screens.
    pub fn all() -> Self {
        Self {
            location: None,
            active_only: false,
        }
    }

    /// Active advertisements, optionally for one placement.
    pub fn active(location: Option<AdLocation>) -> Self {
        Self {
            location,
            active_only: true,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(location) = self.location {
            pairs.push(("location", location.as_str().to_string()));
        }
        pairs.push(("active_only", self.active_only.to_string()));
        pairs
    }
}

/// Active advertisements sharing one placement location.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlacementGroup {
    pub location: AdLocation,
    pub label: &'static str,
    pub advertisements: Vec<Advertisement>,
}

/// Groups the active advertisements by location.
///
/// Every location is present, in [`AdLocation::ALL`] order, and keeps the
/// relative order of the input.
pub fn group_active_by_location(advertisements: &[Advertisement]) -> Vec<PlacementGroup> {
    AdLocation::ALL
        .iter()
        .map(|&location| PlacementGroup {
            location,
            label: location.label(),
            advertisements: advertisements
                .iter()
                .filter(|ad| ad.is_active && ad.placement.location == location)
                .cloned()
                .collect(),
        })
        .collect()
}
