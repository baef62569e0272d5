use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::offer::{ContactInfo, NewOffer, Offer, OfferFilter, TravelDates, calendar_date};
use crate::domain::types::{
    CategoryName, CompanyName, CompanyWebsite, Destination, OfferDescription, OfferId, OfferPrice,
    OfferTitle, SortField, SortOrder, TypeConstraintError,
};

/// Splits a newline-delimited text area into its non-blank trimmed lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Filter bar submitted as the query string of the listing page.
///
/// Every field arrives as text; parsing never fails; unusable values fall
/// back to "not set" or to the default sort.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct OfferFilterForm {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub sort_by: String,
    #[serde(default)]
    pub sort_order: String,
}

fn parse_bound(value: &str) -> Option<Decimal> {
    value.trim().parse::<Decimal>().ok()
}

impl From<OfferFilterForm> for OfferFilter {
    fn from(form: OfferFilterForm) -> Self {
        Self {
            destination: non_blank(&form.destination),
            category: non_blank(&form.category),
            min_price: parse_bound(&form.min_price),
            max_price: parse_bound(&form.max_price),
            sort_by: SortField::try_from(form.sort_by.as_str()).unwrap_or_default(),
            sort_order: SortOrder::try_from(form.sort_order.as_str()).unwrap_or_default(),
        }
    }
}

impl From<&OfferFilter> for OfferFilterForm {
    fn from(filter: &OfferFilter) -> Self {
        Self {
            destination: filter.destination.clone().unwrap_or_default(),
            category: filter.category.clone().unwrap_or_default(),
            min_price: filter.min_price.map(|p| p.to_string()).unwrap_or_default(),
            max_price: filter.max_price.map(|p| p.to_string()).unwrap_or_default(),
            sort_by: filter.sort_by.as_str().to_string(),
            sort_order: filter.sort_order.as_str().to_string(),
        }
    }
}

/// Whether the offer form creates a new record or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferFormMode {
    Create,
    Edit(OfferId),
}

impl OfferFormMode {
    /// Route the form posts back to.
    pub fn action(&self) -> String {
        match self {
            Self::Create => "/admin/offers".to_string(),
            Self::Edit(id) => format!("/admin/offers/edit/{id}"),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }
}

/// Flat field set of the offer form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, PartialEq)]
pub struct OfferForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub destination: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub price: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub category: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub company_name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub company_website: String,
    /// Image URLs, one per line; the first one is the primary image.
    #[serde(default)]
    pub images: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub start_date: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub highlights: String,
    #[serde(default)]
    pub inclusions: String,
    #[serde(default)]
    pub exclusions: String,
    #[serde(default)]
    pub itinerary: String,
}

impl From<&Offer> for OfferForm {
    fn from(offer: &Offer) -> Self {
        let contact = offer.contact_info.clone().unwrap_or_default();
        let joined = |lines: &Option<Vec<String>>| lines.as_deref().unwrap_or_default().join("\n");

        Self {
            title: offer.title.clone(),
            destination: offer.destination.clone(),
            description: offer.description.clone(),
            price: offer.price.to_string(),
            category: offer.category.clone(),
            company_name: offer.company_name.clone(),
            company_website: offer.company_website.clone(),
            images: offer.images.join("\n"),
            start_date: offer
                .travel_dates
                .start_date
                .format(calendar_date::FORMAT)
                .to_string(),
            end_date: offer
                .travel_dates
                .end_date
                .format(calendar_date::FORMAT)
                .to_string(),
            phone: contact.phone.unwrap_or_default(),
            email: contact.email.unwrap_or_default(),
            address: contact.address.unwrap_or_default(),
            highlights: joined(&offer.highlights),
            inclusions: joined(&offer.inclusions),
            exclusions: joined(&offer.exclusions),
            itinerary: offer.itinerary.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum OfferFormError {
    #[error("Please fill in all required fields: {0}")]
    Validation(String),
    #[error("Offer form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for OfferFormError {
    fn from(value: ValidationErrors) -> Self {
        let mut fields: Vec<_> = value
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        Self::Validation(fields.join(", "))
    }
}

impl From<TypeConstraintError> for OfferFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn parse_date(value: &str, field: &'static str) -> Result<chrono::NaiveDate, TypeConstraintError> {
    chrono::NaiveDate::parse_from_str(value.trim(), calendar_date::FORMAT)
        .map_err(|_| TypeConstraintError::InvalidDate(field))
}

impl TryFrom<OfferForm> for NewOffer {
    type Error = OfferFormError;

    fn try_from(value: OfferForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let travel_dates = TravelDates {
            start_date: parse_date(&value.start_date, "start date")?,
            end_date: parse_date(&value.end_date, "end date")?,
        };

        Ok(Self {
            title: OfferTitle::new(value.title)?,
            destination: Destination::new(value.destination)?,
            description: OfferDescription::new(value.description)?,
            price: OfferPrice::parse(&value.price)?,
            category: CategoryName::new(value.category)?,
            company_name: CompanyName::new(value.company_name)?,
            company_website: CompanyWebsite::new(value.company_website)?,
            images: split_lines(&value.images),
            travel_dates,
            highlights: split_lines(&value.highlights),
            inclusions: split_lines(&value.inclusions),
            exclusions: split_lines(&value.exclusions),
            itinerary: non_blank(&value.itinerary),
            contact_info: ContactInfo::from_fields(&value.phone, &value.email, &value.address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filled_form() -> OfferForm {
        OfferForm {
            title: "Overwater Villa Escape".into(),
            destination: "Maldives".into(),
            description: "Seven nights over the lagoon".into(),
            price: "1299.99".into(),
            category: "Luxury".into(),
            company_name: "Atoll Travels".into(),
            company_website: "https://atoll.example".into(),
            start_date: "2025-09-10".into(),
            end_date: "2025-09-17".into(),
            ..OfferForm::default()
        }
    }

    #[test]
    fn splits_lines_dropping_blanks() {
        assert_eq!(split_lines("A\nB\n\nC"), vec!["A", "B", "C"]);
        assert_eq!(split_lines("  spa  \r\n\r\n  dive "), vec!["spa", "dive"]);
        assert!(split_lines("").is_empty());
        assert!(split_lines(" \n \n").is_empty());
    }

    #[test]
    fn builds_payload_from_required_fields() {
        let mut form = filled_form();
        form.highlights = "A\nB\n\nC".into();

        let payload: NewOffer = form.try_into().unwrap();

        assert_eq!(payload.price, Decimal::new(129_999, 2));
        assert_eq!(
            payload.travel_dates,
            TravelDates {
                start_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 9, 17).unwrap(),
            }
        );
        assert_eq!(payload.highlights, vec!["A", "B", "C"]);
        assert!(payload.inclusions.is_empty());
        assert!(payload.exclusions.is_empty());
        assert!(payload.images.is_empty());
        assert!(payload.itinerary.is_none());
        assert!(payload.contact_info.is_empty());
    }

    #[test]
    fn payload_json_nests_dates_and_contact() {
        let mut form = filled_form();
        form.email = "sales@atoll.example".into();
        form.images = " https://img.example/villa.jpg \n\n".into();

        let payload: NewOffer = form.try_into().unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["price"], serde_json::json!(1299.99));
        assert_eq!(
            json["travel_dates"],
            serde_json::json!({"start_date": "2025-09-10", "end_date": "2025-09-17"})
        );
        assert_eq!(
            json["contact_info"],
            serde_json::json!({"email": "sales@atoll.example"})
        );
        assert_eq!(
            json["images"],
            serde_json::json!(["https://img.example/villa.jpg"])
        );
        assert!(json.get("itinerary").is_none());
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut form = filled_form();
        form.company_website = String::new();
        form.end_date = String::new();

        let err = NewOffer::try_from(form).unwrap_err();
        match err {
            OfferFormError::Validation(fields) => {
                assert_eq!(fields, "company_website, end_date")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_whitespace_only_required_field() {
        let mut form = filled_form();
        form.title = "   ".into();
        assert!(matches!(
            NewOffer::try_from(form),
            Err(OfferFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_price() {
        let mut form = filled_form();
        form.price = "twelve".into();
        assert!(matches!(
            NewOffer::try_from(form),
            Err(OfferFormError::TypeConstraint(_))
        ));
    }

    #[test]
    fn filter_form_keeps_only_set_fields() {
        let form = OfferFilterForm {
            category: "Beach".into(),
            min_price: "100".into(),
            max_price: "abc".into(),
            sort_by: "price".into(),
            sort_order: "asc".into(),
            ..OfferFilterForm::default()
        };

        let filter = OfferFilter::from(form);

        assert_eq!(filter.destination, None);
        assert_eq!(filter.category.as_deref(), Some("Beach"));
        assert_eq!(filter.min_price, Some(Decimal::new(100, 0)));
        assert_eq!(filter.max_price, None);
        assert_eq!(filter.sort_by, SortField::Price);
        assert_eq!(filter.sort_order, SortOrder::Asc);
    }

    #[test]
    fn empty_filter_form_is_the_cleared_filter() {
        let filter = OfferFilter::from(OfferFilterForm::default());
        assert!(filter.is_default());
        assert_eq!(filter.sort_by, SortField::CreatedAt);
        assert_eq!(filter.sort_order, SortOrder::Desc);
    }

    #[test]
    fn edit_form_round_trips_offer_values() {
        let offer: Offer = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "title": "Reef Dive",
            "destination": "Ari Atoll",
            "description": "Three dives a day",
            "price": 450,
            "category": "Adventure",
            "company_name": "Blue Fins",
            "company_website": "https://bluefins.example",
            "images": ["https://img.example/a.jpg", "https://img.example/b.jpg"],
            "travel_dates": {"start_date": "2025-05-01", "end_date": "2025-05-04"},
            "inclusions": ["Gear", "Boat"],
            "contact_info": {"phone": "+960 777"},
            "created_at": "2025-01-01T00:00:00"
        }))
        .unwrap();

        let form = OfferForm::from(&offer);

        assert_eq!(form.price, "450");
        assert_eq!(form.images, "https://img.example/a.jpg\nhttps://img.example/b.jpg");
        assert_eq!(form.inclusions, "Gear\nBoat");
        assert_eq!(form.highlights, "");
        assert_eq!(form.phone, "+960 777");
        assert_eq!(form.start_date, "2025-05-01");

        let payload = NewOffer::try_from(form).unwrap();
        assert_eq!(payload.inclusions, vec!["Gear", "Boat"]);
        assert_eq!(payload.price, Decimal::new(450, 0));
    }

    #[test]
    fn saving_unchanged_edit_form_keeps_every_image() {
        let offer: Offer = serde_json::from_value(serde_json::json!({
            "id": "o2",
            "title": "Fjord Cruise",
            "destination": "Bergen",
            "description": "Five fjords in a week",
            "price": 0,
            "category": "Cruise",
            "company_name": "Nordic Lines",
            "company_website": "https://nordic.example",
            "images": ["https://i/1.jpg", "https://i/2.jpg", "https://i/3.jpg"],
            "travel_dates": {"start_date": "2025-06-01", "end_date": "2025-06-07"},
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        let payload = NewOffer::try_from(OfferForm::from(&offer)).unwrap();

        assert_eq!(payload.images, offer.images);
        assert_eq!(payload.price, Decimal::ZERO);
    }

    #[test]
    fn form_mode_selects_action() {
        assert_eq!(OfferFormMode::Create.action(), "/admin/offers");
        let id = OfferId::new("abc").unwrap();
        assert_eq!(OfferFormMode::Edit(id).action(), "/admin/offers/edit/abc");
    }
}
