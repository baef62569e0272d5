use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AdminSession;
use crate::domain::types::OfferId;
use crate::forms::offers::{OfferForm, OfferFormMode};
use crate::repository::ApiClient;
use crate::routes::auth::LOGIN_URL;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::dashboard::DashboardTab;
use crate::services::offers::{
    delete_offer as delete_offer_service, load_offer_form, submit_offer,
};
use crate::session::SessionContext;

const SAVE_FAILED: &str = "Failed to save travel offer. Please try again.";

fn render_offer_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    admin: &AdminSession,
    mode: &OfferFormMode,
    form: &OfferForm,
    error: Option<&str>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, admin, "offer_form");
    context.insert("form", form);
    context.insert("action", &mode.action());
    context.insert("is_edit", &mode.is_edit());
    if let Some(error) = error {
        context.insert("error", error);
    }
    render_template(tera, "admin/offer_form.html", &context)
}

async fn show_form(
    mode: OfferFormMode,
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: &ApiClient,
    tera: &Tera,
) -> HttpResponse {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match load_offer_form(&mode, &admin, &api).await {
        Ok(form) => render_offer_form(tera, &flash_messages, &admin, &mode, &form, None),
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Travel offer not found.").send();
            redirect(&DashboardTab::Offers.url())
        }
        Err(err) => {
            log::error!("Failed to load offer form: {err}");
            FlashMessage::error("Failed to load travel offer. Please try again later.").send();
            redirect(&DashboardTab::Offers.url())
        }
    }
}

/// Shared submit path: `mode` decides between create and full replace.
async fn handle_submission(
    mode: OfferFormMode,
    form: OfferForm,
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: &ApiClient,
    tera: &Tera,
) -> HttpResponse {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match submit_offer(&mode, form.clone(), &admin, &api).await {
        Ok(Some(offer)) => {
            let verb = if mode.is_edit() { "updated" } else { "created" };
            FlashMessage::success(format!("Travel offer \"{}\" {verb}.", offer.title)).send();
            redirect(&DashboardTab::Offers.url())
        }
        Ok(None) => render_offer_form(
            tera,
            &flash_messages,
            &admin,
            &mode,
            &form,
            Some(SAVE_FAILED),
        ),
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Travel offer not found.").send();
            redirect(&DashboardTab::Offers.url())
        }
        Err(ServiceError::Form(message)) => {
            render_offer_form(tera, &flash_messages, &admin, &mode, &form, Some(&message))
        }
        Err(ServiceError::Internal) => HttpResponse::InternalServerError().finish(),
    }
}

fn edit_mode(offer_id: &str) -> Option<OfferFormMode> {
    OfferId::new(offer_id).ok().map(OfferFormMode::Edit)
}

#[get("/admin/offers/new")]
pub async fn new_offer(
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    show_form(OfferFormMode::Create, session, flash_messages, &api, &tera).await
}

#[post("/admin/offers")]
pub async fn create_offer(
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<OfferForm>,
) -> impl Responder {
    handle_submission(OfferFormMode::Create, form, session, flash_messages, &api, &tera).await
}

#[get("/admin/offers/edit/{offer_id}")]
pub async fn edit_offer(
    offer_id: web::Path<String>,
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match edit_mode(&offer_id) {
        Some(mode) => show_form(mode, session, flash_messages, &api, &tera).await,
        None => HttpResponse::NotFound().finish(),
    }
}

#[post("/admin/offers/edit/{offer_id}")]
pub async fn update_offer(
    offer_id: web::Path<String>,
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<OfferForm>,
) -> impl Responder {
    match edit_mode(&offer_id) {
        Some(mode) => handle_submission(mode, form, session, flash_messages, &api, &tera).await,
        None => HttpResponse::NotFound().finish(),
    }
}

#[post("/admin/offers/{offer_id}/delete")]
pub async fn delete_offer(
    offer_id: web::Path<String>,
    session: SessionContext,
    api: web::Data<ApiClient>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match delete_offer_service(&offer_id, &admin, &api).await {
        Ok(true) => FlashMessage::success("Travel offer deleted.").send(),
        Ok(false) => FlashMessage::error("Failed to delete travel offer.").send(),
        Err(ServiceError::Unauthorized) => return redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => FlashMessage::error("Travel offer not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
    }

    redirect(&DashboardTab::Offers.url())
}
