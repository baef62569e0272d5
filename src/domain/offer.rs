use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryName, CompanyName, CompanyWebsite, Destination, OfferDescription, OfferId, OfferPrice,
    OfferTitle, SortField, SortOrder,
};

/// Calendar dates exchanged with the API as `YYYY-MM-DD`.
///
/// Older records carry full ISO-8601 timestamps; only the date part is kept.
pub mod calendar_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).ok_or_else(|| D::Error::custom(format!("invalid calendar date: {value}")))
    }

    /// Parses a plain date, an RFC 3339 timestamp or a naive timestamp.
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, FORMAT) {
            return Some(date);
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Some(timestamp.date_naive());
        }
        if let Ok(timestamp) = value.parse::<NaiveDateTime>() {
            return Some(timestamp.date());
        }
        None
    }
}

/// Timestamps written by the API.
///
/// Records carry either naive ISO-8601 timestamps or ones with a UTC offset;
/// both are normalised to naive UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {value}")))
    }

    pub fn parse(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Some(timestamp.naive_utc());
        }
        value.parse::<NaiveDateTime>().ok()
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            value.serialize(serializer)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(value) => super::parse(&value)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {value}"))),
            }
        }
    }
}

/// Start and end of the travel period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelDates {
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
}

/// Optional contact details of the seller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactInfo {
    /// Builds contact details, dropping blank fields.
    pub fn from_fields(phone: &str, email: &str, address: &str) -> Self {
        fn present(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        Self {
            phone: present(phone),
            email: present(email),
            address: present(address),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }
}

/// A travel offer as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub destination: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub company_name: String,
    pub company_website: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub travel_dates: TravelDates,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    #[serde(default)]
    pub inclusions: Option<Vec<String>>,
    #[serde(default)]
    pub exclusions: Option<Vec<String>>,
    #[serde(default)]
    pub itinerary: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Offer {
    /// First image, which is the one shown on cards.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Payload sent to the API when creating or replacing an offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOffer {
    pub title: OfferTitle,
    pub destination: Destination,
    pub description: OfferDescription,
    pub price: OfferPrice,
    pub category: CategoryName,
    pub company_name: CompanyName,
    pub company_website: CompanyWebsite,
    pub images: Vec<String>,
    pub travel_dates: TravelDates,
    pub highlights: Vec<String>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<String>,
    pub contact_info: ContactInfo,
}

/// Immutable criteria for one offer listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferFilter {
    /// Case-insensitive substring matched by the API.
    pub destination: Option<String>,
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl OfferFilter {
    /// Query parameters for `GET /offers`, in a stable order.
    ///
    /// Only the criteria that are set are included; the sort pair is always
    /// present.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(destination) = &self.destination {
            pairs.push(("destination", destination.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        pairs.push(("sort_by", self.sort_by.as_str().to_string()));
        pairs.push(("sort_order", self.sort_order.as_str().to_string()));
        pairs
    }

    /// True when the filter equals the cleared state.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
