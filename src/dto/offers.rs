//! Template-facing views of travel offers.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::offer::{Offer, TravelDates};

/// Shown on cards whose offer has no images.
pub const FALLBACK_IMAGE_URL: &str = "https://images.unsplash.com/photo-1517760444937-f6397edcbbcd?q=80&w=2670&auto=format&fit=crop";

const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

fn display_price(price: Decimal) -> String {
    price.round_dp(2).normalize().to_string()
}

fn non_empty(items: &Option<Vec<String>>) -> Vec<String> {
    items
        .iter()
        .flatten()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelDatesDto {
    pub start_date: String,
    pub end_date: String,
}

impl From<TravelDates> for TravelDatesDto {
    fn from(value: TravelDates) -> Self {
        Self {
            start_date: value.start_date.format(DISPLAY_DATE_FORMAT).to_string(),
            end_date: value.end_date.format(DISPLAY_DATE_FORMAT).to_string(),
        }
    }
}

/// Offer as rendered in the listing grid and the dashboard table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferCardDto {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
    pub travel_dates: TravelDatesDto,
    pub company_name: String,
    pub company_website: String,
    pub detail_url: String,
}

impl From<&Offer> for OfferCardDto {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id.to_string(),
            title: offer.title.clone(),
            destination: offer.destination.clone(),
            category: offer.category.clone(),
            price: display_price(offer.price),
            image_url: offer
                .primary_image()
                .unwrap_or(FALLBACK_IMAGE_URL)
                .to_string(),
            travel_dates: offer.travel_dates.into(),
            company_name: offer.company_name.clone(),
            company_website: offer.company_website.clone(),
            detail_url: format!("/offers/{}", offer.id),
        }
    }
}

/// A contact action such as `tel:` or `mailto:`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactLinkDto {
    pub label: String,
    pub href: String,
}

/// Offer detail page.
///
/// Optional sections are normalised to empty values so templates only need
/// truthiness checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferDetailDto {
    #[serde(flatten)]
    pub card: OfferCardDto,
    pub description: String,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub itinerary: Option<String>,
    pub phone: Option<ContactLinkDto>,
    pub email: Option<ContactLinkDto>,
    pub address: Option<String>,
}

impl From<&Offer> for OfferDetailDto {
    fn from(offer: &Offer) -> Self {
        let contact = offer.contact_info.clone().unwrap_or_default();
        let phone = present(&contact.phone);
        let email = present(&contact.email);

        Self {
            card: OfferCardDto::from(offer),
            description: offer.description.clone(),
            images: offer.images.clone(),
            highlights: non_empty(&offer.highlights),
            inclusions: non_empty(&offer.inclusions),
            exclusions: non_empty(&offer.exclusions),
            itinerary: present(&offer.itinerary),
            phone: phone.map(|phone| ContactLinkDto {
                href: format!("tel:{phone}"),
                label: phone,
            }),
            email: email.map(|email| ContactLinkDto {
                href: format!("mailto:{email}"),
                label: email,
            }),
            address: present(&contact.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::offer::ContactInfo;
    use crate::domain::types::OfferId;

    fn offer() -> Offer {
        Offer {
            id: OfferId::new("o1").unwrap(),
            title: "Overwater Villa Escape".into(),
            destination: "Maldives".into(),
            description: "Seven nights over the lagoon".into(),
            price: Decimal::new(150_000, 2),
            category: "Luxury".into(),
            company_name: "Atoll Travels".into(),
            company_website: "https://atoll.example".into(),
            images: vec![],
            travel_dates: TravelDates {
                start_date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 9, 17).unwrap(),
            },
            highlights: Some(vec!["Snorkelling".into(), "  ".into()]),
            inclusions: Some(vec![]),
            exclusions: None,
            itinerary: Some("   ".into()),
            contact_info: Some(ContactInfo {
                phone: Some("+960 123".into()),
                email: Some(" ".into()),
                address: None,
            }),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn card_falls_back_to_default_image() {
        let card = OfferCardDto::from(&offer());
        assert_eq!(card.image_url, FALLBACK_IMAGE_URL);
        assert_eq!(card.price, "1500");
        assert_eq!(card.travel_dates.start_date, "Sep 10, 2025");
        assert_eq!(card.detail_url, "/offers/o1");
    }

    #[test]
    fn card_uses_first_image() {
        let mut offer = offer();
        offer.images = vec![
            "https://img.example/a.jpg".into(),
            "https://img.example/b.jpg".into(),
        ];
        assert_eq!(OfferCardDto::from(&offer).image_url, "https://img.example/a.jpg");
    }

    #[test]
    fn detail_drops_empty_sections() {
        let detail = OfferDetailDto::from(&offer());

        assert_eq!(detail.highlights, vec!["Snorkelling".to_string()]);
        assert!(detail.inclusions.is_empty());
        assert!(detail.exclusions.is_empty());
        assert!(detail.itinerary.is_none());
        assert_eq!(
            detail.phone,
            Some(ContactLinkDto {
                label: "+960 123".into(),
                href: "tel:+960 123".into()
            })
        );
        assert!(detail.email.is_none());
        assert!(detail.address.is_none());
    }

    #[test]
    fn detail_without_contact_info_has_no_actions() {
        let mut offer = offer();
        offer.contact_info = None;
        let detail = OfferDetailDto::from(&offer);
        assert!(detail.phone.is_none() && detail.email.is_none());
    }
}
