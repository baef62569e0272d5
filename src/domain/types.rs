//! Strongly-typed value objects used by domain entities.
//!
//! Write payloads carry these wrappers instead of raw primitives so that
//! required text values, identifiers and the price constraint are enforced at
//! the form boundary before anything reaches the API.

use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A numeric value could not be parsed.
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    /// A calendar date could not be parsed.
    #[error("{0} must be a date in YYYY-MM-DD format")]
    InvalidDate(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate trimmed, non-empty string newtypes.
///
/// Identifiers issued by the API are opaque strings, so they share the same
/// representation as the required text fields.
macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

non_empty_string_newtype!(OfferId, "Identifier assigned to an offer by the API.", "offer id");
non_empty_string_newtype!(
    CategoryId,
    "Identifier assigned to a category by the API.",
    "category id"
);
non_empty_string_newtype!(
    AdvertisementId,
    "Identifier assigned to an advertisement by the API.",
    "advertisement id"
);

non_empty_string_newtype!(OfferTitle, "Offer title.", "title");
non_empty_string_newtype!(Destination, "Offer destination.", "destination");
non_empty_string_newtype!(OfferDescription, "Offer description.", "description");
non_empty_string_newtype!(CategoryName, "Category name.", "category");
non_empty_string_newtype!(CompanyName, "Name of the company selling an offer.", "company name");
non_empty_string_newtype!(
    CompanyWebsite,
    "Website of the company selling an offer.",
    "company website"
);
non_empty_string_newtype!(AdTitle, "Advertisement title.", "title");
non_empty_string_newtype!(AdImageUrl, "Advertisement image URL.", "image URL");
non_empty_string_newtype!(AdLinkUrl, "Advertisement target URL.", "link URL");
non_empty_string_newtype!(
    AccessToken,
    "Opaque bearer token proving an admin session.",
    "access token"
);

/// Non-negative price in standard currency units.
///
/// Serialized as a JSON number because that is what the API stores.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OfferPrice(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl OfferPrice {
    /// Constructs a price that must be zero or greater.
    pub fn new(value: Decimal) -> Result<Self, TypeConstraintError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(TypeConstraintError::NegativeNumber("price"))
        } else {
            Ok(Self(value))
        }
    }

    /// Parses a user-entered decimal string.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let value = value
            .trim()
            .parse::<Decimal>()
            .map_err(|_| TypeConstraintError::InvalidNumber("price"))?;
        Self::new(value)
    }

    /// Returns the raw decimal value.
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl Display for OfferPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<Decimal> for OfferPrice {
    fn eq(&self, other: &Decimal) -> bool {
        self.0 == *other
    }
}

/// Location on the site where an advertisement may be rendered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AdLocation {
    Hero,
    Sidebar,
    OfferDetail,
    Footer,
}

impl AdLocation {
    /// Every placement, in display order.
    pub const ALL: [AdLocation; 4] = [
        AdLocation::Hero,
        AdLocation::Sidebar,
        AdLocation::OfferDetail,
        AdLocation::Footer,
    ];

    /// Wire representation used by the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Sidebar => "sidebar",
            Self::OfferDetail => "offer_detail",
            Self::Footer => "footer",
        }
    }

    /// Human readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Hero banner",
            Self::Sidebar => "Sidebar",
            Self::OfferDetail => "Offer detail page",
            Self::Footer => "Footer",
        }
    }
}

impl Display for AdLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for AdLocation {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "hero" => Ok(Self::Hero),
            "sidebar" => Ok(Self::Sidebar),
            "offer_detail" => Ok(Self::OfferDetail),
            "footer" => Ok(Self::Footer),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "placement location: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for AdLocation {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Field the offer listing is ordered by.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "travel_dates.start_date")]
    TravelStartDate,
}

impl SortField {
    /// Query parameter value understood by the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price",
            Self::TravelStartDate => "travel_dates.start_date",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SortField {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "created_at" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "travel_dates.start_date" => Ok(Self::TravelStartDate),
            other => Err(TypeConstraintError::InvalidValue(format!("sort field: {other}"))),
        }
    }
}

/// Direction of the offer listing order.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Query parameter value understood by the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!("sort order: {other}"))),
        }
    }
}
