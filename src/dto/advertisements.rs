use serde::Serialize;

use crate::domain::advertisement::{Advertisement, PlacementGroup};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertisementDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub location: &'static str,
    pub location_label: &'static str,
    pub placement_description: String,
    pub is_active: bool,
}

impl From<&Advertisement> for AdvertisementDto {
    fn from(ad: &Advertisement) -> Self {
        Self {
            id: ad.id.to_string(),
            title: ad.title.clone(),
            description: ad.description.clone().unwrap_or_default(),
            image_url: ad.image_url.clone(),
            link_url: ad.link_url.clone(),
            location: ad.placement.location.as_str(),
            location_label: ad.placement.location.label(),
            placement_description: ad.placement.description.clone().unwrap_or_default(),
            is_active: ad.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementGroupDto {
    pub location: &'static str,
    pub label: &'static str,
    pub advertisements: Vec<AdvertisementDto>,
}

impl From<PlacementGroup> for PlacementGroupDto {
    fn from(group: PlacementGroup) -> Self {
        Self {
            location: group.location.as_str(),
            label: group.label,
            advertisements: group
                .advertisements
                .iter()
                .map(AdvertisementDto::from)
                .collect(),
        }
    }
}
