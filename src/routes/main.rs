use actix_web::http::StatusCode;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use futures_util::future::{join, join3};
use tera::Tera;

use crate::domain::offer::OfferFilter;
use crate::domain::types::{SortField, SortOrder};
use crate::forms::offers::OfferFilterForm;
use crate::repository::ApiClient;
use crate::routes::{base_context, render_template, render_with_status};
use crate::services::ServiceError;
use crate::services::advertisements::{
    show_offer_detail_advertisements, show_public_placements,
};
use crate::services::offers::{
    show_filter_categories, show_offer as show_offer_service, show_offers,
};
use crate::session::SessionContext;

const LOAD_OFFERS_ERROR: &str = "Failed to load travel offers. Please try again later.";
const LOAD_OFFER_ERROR: &str = "Failed to load travel offer. Please try again later.";
const OFFER_NOT_FOUND: &str = "Travel offer not found.";

fn sort_field_options() -> Vec<(&'static str, &'static str)> {
    vec![
        (SortField::CreatedAt.as_str(), "Newest"),
        (SortField::Price.as_str(), "Price"),
        (SortField::TravelStartDate.as_str(), "Travel date"),
    ]
}

fn sort_order_options() -> Vec<(&'static str, &'static str)> {
    vec![
        (SortOrder::Desc.as_str(), "Descending"),
        (SortOrder::Asc.as_str(), "Ascending"),
    ]
}

/// Public listing. The filter form submits here with GET, so every filter
/// change is a fresh page built from one immutable [`OfferFilter`].
#[get("/")]
pub async fn index(
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
    web::Query(form): web::Query<OfferFilterForm>,
) -> impl Responder {
    let filter = OfferFilter::from(form);
    let api = api.get_ref();

    let (offers, categories, placements) = join3(
        show_offers(&filter, api),
        show_filter_categories(api),
        show_public_placements(api),
    )
    .await;

    let mut context = base_context(&flash_messages, &session.admin(), "index");
    context.insert("filter", &OfferFilterForm::from(&filter));
    context.insert("filter_active", &!filter.is_default());
    context.insert("categories", &categories);
    context.insert("sort_fields", &sort_field_options());
    context.insert("sort_orders", &sort_order_options());
    context.insert("placements", &placements);

    match offers {
        Ok(offers) => context.insert("offers", &offers),
        Err(err) => {
            log::error!("Offer listing unavailable: {err}");
            context.insert("offers", &Vec::<()>::new());
            context.insert("error", LOAD_OFFERS_ERROR);
        }
    }

    render_template(&tera, "main/index.html", &context)
}

#[get("/offers/{offer_id}")]
pub async fn show_offer(
    offer_id: web::Path<String>,
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = api.get_ref();
    let (offer, advertisements) = join(
        show_offer_service(&offer_id, api),
        show_offer_detail_advertisements(api),
    )
    .await;

    let mut context = base_context(&flash_messages, &session.admin(), "offer");
    context.insert("advertisements", &advertisements);

    match offer {
        Ok(offer) => {
            context.insert("offer", &offer);
            render_template(&tera, "main/offer.html", &context)
        }
        Err(ServiceError::NotFound) => {
            context.insert("error", OFFER_NOT_FOUND);
            render_with_status(StatusCode::NOT_FOUND, &tera, "main/offer.html", &context)
        }
        Err(err) => {
            log::error!("Offer {offer_id} unavailable: {err}");
            context.insert("error", LOAD_OFFER_ERROR);
            render_template(&tera, "main/offer.html", &context)
        }
    }
}
