use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::advertisements::AdvertisementForm;
use crate::repository::ApiClient;
use crate::routes::auth::LOGIN_URL;
use crate::routes::redirect;
use crate::services::ServiceError;
use crate::services::advertisements::{
    add_advertisement as add_advertisement_service,
    delete_advertisement as delete_advertisement_service,
    toggle_advertisement as toggle_advertisement_service,
    update_advertisement as update_advertisement_service,
};
use crate::services::dashboard::DashboardTab;
use crate::session::SessionContext;

fn ads_url() -> String {
    DashboardTab::Ads.url()
}

/// Flash the outcome of an advertisement mutation and pick the response.
fn finish(result: Result<bool, ServiceError>, success: &str, failure: &str) -> HttpResponse {
    match result {
        Ok(true) => FlashMessage::success(success).send(),
        Ok(false) => FlashMessage::error(failure).send(),
        Err(ServiceError::Unauthorized) => return redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => FlashMessage::error("Advertisement not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
    }

    redirect(&ads_url())
}

#[post("/admin/advertisements")]
pub async fn add_advertisement(
    session: SessionContext,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AdvertisementForm>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    finish(
        add_advertisement_service(form, &admin, &api).await,
        "Advertisement created.",
        "Failed to save advertisement.",
    )
}

#[post("/admin/advertisements/{advertisement_id}/update")]
pub async fn update_advertisement(
    advertisement_id: web::Path<String>,
    session: SessionContext,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AdvertisementForm>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    finish(
        update_advertisement_service(&advertisement_id, form, &admin, &api).await,
        "Advertisement updated.",
        "Failed to save advertisement.",
    )
}

#[post("/admin/advertisements/{advertisement_id}/toggle")]
pub async fn toggle_advertisement(
    advertisement_id: web::Path<String>,
    session: SessionContext,
    api: web::Data<ApiClient>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    finish(
        toggle_advertisement_service(&advertisement_id, &admin, &api).await,
        "Advertisement status updated.",
        "Failed to update advertisement status.",
    )
}

#[post("/admin/advertisements/{advertisement_id}/delete")]
pub async fn delete_advertisement(
    advertisement_id: web::Path<String>,
    session: SessionContext,
    api: web::Data<ApiClient>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    finish(
        delete_advertisement_service(&advertisement_id, &admin, &api).await,
        "Advertisement deleted.",
        "Failed to delete advertisement.",
    )
}
