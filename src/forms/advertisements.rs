use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::advertisement::{AdPlacement, Advertisement, NewAdvertisement};
use crate::domain::types::{AdImageUrl, AdLinkUrl, AdLocation, AdTitle, TypeConstraintError};

/// Advertisement create/edit form.
///
/// `is_active` is a checkbox: browsers omit it when unchecked.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, PartialEq)]
pub struct AdvertisementForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub image_url: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub link_url: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub placement_description: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Default for AdvertisementForm {
    /// Initial values of the create form; new advertisements start active.
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            link_url: String::new(),
            location: AdLocation::Hero.as_str().to_string(),
            placement_description: String::new(),
            is_active: true,
        }
    }
}

impl From<&Advertisement> for AdvertisementForm {
    fn from(ad: &Advertisement) -> Self {
        Self {
            title: ad.title.clone(),
            description: ad.description.clone().unwrap_or_default(),
            image_url: ad.image_url.clone(),
            link_url: ad.link_url.clone(),
            location: ad.placement.location.as_str().to_string(),
            placement_description: ad.placement.description.clone().unwrap_or_default(),
            is_active: ad.is_active,
        }
    }
}

#[derive(Debug, Error)]
pub enum AdvertisementFormError {
    #[error("Advertisement form validation failed: {0}")]
    Validation(String),
    #[error("Advertisement form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AdvertisementFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AdvertisementFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl TryFrom<AdvertisementForm> for NewAdvertisement {
    type Error = AdvertisementFormError;

    fn try_from(value: AdvertisementForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            title: AdTitle::new(value.title)?,
            description: optional_text(&value.description),
            image_url: AdImageUrl::new(value.image_url)?,
            link_url: AdLinkUrl::new(value.link_url)?,
            placement: AdPlacement {
                location: AdLocation::try_from(value.location.as_str())?,
                description: optional_text(&value.placement_description),
            },
            is_active: value.is_active,
        })
    }
}
