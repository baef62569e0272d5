use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::types::AdLocation;
use crate::repository::ApiClient;
use crate::routes::auth::LOGIN_URL;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::dashboard::{DashboardQuery, load_dashboard};
use crate::session::SessionContext;

fn location_options() -> Vec<(&'static str, &'static str)> {
    AdLocation::ALL
        .iter()
        .map(|location| (location.as_str(), location.label()))
        .collect()
}

#[get("/admin/dashboard")]
pub async fn show_dashboard(
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    api: web::Data<ApiClient>,
    tera: web::Data<Tera>,
    web::Query(query): web::Query<DashboardQuery>,
) -> impl Responder {
    let admin = session.admin();
    let api = api.with_session(&admin);

    match load_dashboard(&query, &admin, &api).await {
        Ok(view) => {
            let mut context = base_context(&flash_messages, &admin, "dashboard");
            context.insert("dashboard", &view);
            context.insert("ad_locations", &location_options());
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect(LOGIN_URL),
        Err(err) => {
            log::error!("Failed to render dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
