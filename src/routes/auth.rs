use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::LoginForm;
use crate::repository::ApiClient;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{
    create_default_admin as create_default_admin_service, login as login_service,
};
use crate::session::SessionContext;

pub const DASHBOARD_URL: &str = "/admin/dashboard";
pub const LOGIN_URL: &str = "/admin";

/// Login page; an existing token skips straight to the dashboard.
#[get("/admin")]
pub async fn login_page(
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let admin = session.admin();
    if admin.is_authenticated() {
        return redirect(DASHBOARD_URL);
    }

    let context = base_context(&flash_messages, &admin, "login");
    render_template(&tera, "admin/login.html", &context)
}

#[post("/admin/login")]
pub async fn login(
    session: SessionContext,
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match login_service(form, api.get_ref()).await {
        Ok(token) => {
            if let Err(e) = session.persist_token(&token) {
                log::error!("Failed to store access token: {e}");
                FlashMessage::error("Login succeeded but the session could not be saved.")
                    .send();
                return redirect(LOGIN_URL);
            }
            redirect(DASHBOARD_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid username or password").send();
            redirect(LOGIN_URL)
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/logout")]
pub async fn logout(session: SessionContext) -> impl Responder {
    session.clear_token();
    FlashMessage::info("You have been logged out.").send();
    redirect(LOGIN_URL)
}

#[post("/admin/create-default-admin")]
pub async fn create_default_admin(api: web::Data<ApiClient>) -> impl Responder {
    match create_default_admin_service(api.get_ref()).await {
        Ok(true) => FlashMessage::success(
            "Default admin created successfully! Username: admin, Password: admin123",
        )
        .send(),
        Ok(false) => FlashMessage::error("Failed to create default admin.").send(),
        Err(err) => {
            log::error!("Failed to create default admin: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    redirect(LOGIN_URL)
}
