use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::categories::CategoryForm;
use crate::repository::ApiClient;
use crate::routes::auth::LOGIN_URL;
use crate::routes::redirect;
use crate::services::ServiceError;
use crate::services::categories::{
    CategoryDeletion, add_category as add_category_service,
    delete_category as delete_category_service, update_category as update_category_service,
};
use crate::services::dashboard::DashboardTab;
use crate::session::SessionContext;

const SAVE_FAILED: &str = "Failed to save category.";

fn categories_url() -> String {
    DashboardTab::Categories.url()
}

#[post("/admin/categories")]
pub async fn add_category(
    session: SessionContext,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match add_category_service(form, &admin, &api).await {
        Ok(true) => FlashMessage::success("Category created.").send(),
        Ok(false) => FlashMessage::error(SAVE_FAILED).send(),
        Err(ServiceError::Unauthorized) => return redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
    }

    redirect(&categories_url())
}

#[post("/admin/categories/{category_id}/update")]
pub async fn update_category(
    category_id: web::Path<String>,
    session: SessionContext,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match update_category_service(&category_id, form, &admin, &api).await {
        Ok(true) => FlashMessage::success("Category updated.").send(),
        Ok(false) => FlashMessage::error(SAVE_FAILED).send(),
        Err(ServiceError::Unauthorized) => return redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(ServiceError::Form(message)) => {
            // Keep the row in edit mode so the admin can correct the name.
            FlashMessage::error(message).send();
            return redirect(&format!("{}&edit={category_id}", categories_url()));
        }
        Err(ServiceError::Internal) => return HttpResponse::InternalServerError().finish(),
    }

    redirect(&categories_url())
}

/// Second step of the two-step delete; the first step only marks the row on
/// the dashboard with `confirm_delete`.
#[post("/admin/categories/{category_id}/delete")]
pub async fn delete_category(
    category_id: web::Path<String>,
    session: SessionContext,
    api: web::Data<ApiClient>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match delete_category_service(&category_id, &admin, &api).await {
        Ok(CategoryDeletion::Deleted) => FlashMessage::success("Category deleted.").send(),
        Ok(CategoryDeletion::InUse) => {
            FlashMessage::error("Cannot delete a category that is used by travel offers.").send()
        }
        Ok(CategoryDeletion::Failed) => FlashMessage::error("Failed to delete category.").send(),
        Err(ServiceError::Unauthorized) => return redirect(LOGIN_URL),
        Err(ServiceError::NotFound) => FlashMessage::error("Category not found.").send(),
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(&categories_url())
}
