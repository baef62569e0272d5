use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::auth::AdminSession;
use crate::session::SessionContext;

pub mod advertisements;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod main;
pub mod offers;

/// Register every application route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(main::show_offer)
        .service(auth::login_page)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::create_default_admin)
        .service(dashboard::show_dashboard)
        .service(offers::new_offer)
        .service(offers::create_offer)
        .service(offers::edit_offer)
        .service(offers::update_offer)
        .service(offers::delete_offer)
        .service(categories::add_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(advertisements::add_advertisement)
        .service(advertisements::update_advertisement)
        .service(advertisements::toggle_advertisement)
        .service(advertisements::delete_advertisement);
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(StatusCode::OK, tera, template, context)
}

pub fn render_with_status(
    status: StatusCode,
    tera: &Tera,
    template: &str,
    context: &Context,
) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(tera.render(template, context).unwrap_or_else(|e| {
            log::error!("Failed to render template '{template}': {e}");
            String::new()
        }))
}

/// `303 See Other` to `location`, so the browser follows with a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &AdminSession,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("is_admin", &session.is_authenticated());
    context.insert("current_page", current_page);
    context
}

/// Default service: any unmatched path renders the not-found page.
pub async fn not_found(
    session: SessionContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let context = base_context(&flash_messages, &session.admin(), "not_found");
    render_with_status(
        StatusCode::NOT_FOUND,
        &tera,
        "main/not_found.html",
        &context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_flash_levels_to_alert_classes() {
        assert_eq!(alert_level_to_str(&Level::Error), "danger");
        assert_eq!(alert_level_to_str(&Level::Success), "success");
        assert_eq!(alert_level_to_str(&Level::Info), "info");
    }

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/admin");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin"
        );
    }
}
