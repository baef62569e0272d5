use actix_web::http::{StatusCode, header};
use actix_web::test::{TestRequest, call_service, init_service, read_body};

mod common;

fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[test]
fn templates_parse() {
    let tera = common::templates();
    for name in [
        "base.html",
        "main/index.html",
        "main/offer.html",
        "main/not_found.html",
        "admin/login.html",
        "admin/dashboard.html",
        "admin/offer_form.html",
    ] {
        assert!(
            tera.get_template_names().any(|n| n == name),
            "missing template {name}"
        );
    }
}

#[actix_web::test]
async fn listing_shows_error_banner_when_api_is_down() {
    let app = init_service(common::test_app()).await;
    let req = TestRequest::get()
        .uri("/?category=Beach&sort_by=price&sort_order=asc")
        .to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_body(response).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("Failed to load travel offers. Please try again later."));
    assert!(body.contains("value=\"price\" selected"));
}

#[actix_web::test]
async fn offer_detail_shows_error_when_api_is_down() {
    let app = init_service(common::test_app()).await;
    let req = TestRequest::get().uri("/offers/abc").to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_body(response).await;
    assert!(String::from_utf8_lossy(&body).contains("Failed to load travel offer."));
}

#[actix_web::test]
async fn unknown_path_renders_not_found() {
    let app = init_service(common::test_app()).await;
    let req = TestRequest::get().uri("/no/such/page").to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_body(response).await;
    assert!(String::from_utf8_lossy(&body).contains("Page not found"));
}

#[actix_web::test]
async fn login_page_renders_for_anonymous_visitors() {
    let app = init_service(common::test_app()).await;
    let req = TestRequest::get().uri("/admin").to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_body(response).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("action=\"/admin/login\""));
    assert!(body.contains("name=\"password\""));
}

#[actix_web::test]
async fn dashboard_requires_token() {
    let app = init_service(common::test_app()).await;
    let req = TestRequest::get()
        .uri("/admin/dashboard?tab=ads")
        .to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
}

#[actix_web::test]
async fn admin_mutations_require_token() {
    let app = init_service(common::test_app()).await;

    let req = TestRequest::post()
        .uri("/admin/offers")
        .set_form([("title", "Bali Escape"), ("price", "100")])
        .to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");

    for uri in [
        "/admin/offers/abc/delete",
        "/admin/categories/abc/delete",
        "/admin/advertisements/abc/toggle",
        "/admin/advertisements/abc/delete",
    ] {
        let req = TestRequest::post().uri(uri).to_request();
        let response = call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/admin", "{uri}");
    }
}

#[actix_web::test]
async fn failed_login_returns_to_login_page() {
    let app = init_service(common::test_app()).await;
    let req = TestRequest::post()
        .uri("/admin/login")
        .set_form([("username", "admin"), ("password", "wrong")])
        .to_request();
    let response = call_service(&app, req).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
}
