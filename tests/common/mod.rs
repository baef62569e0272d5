//! Helpers for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use serde_json::{Value, json};
use tera::Tera;

use travel_offers::repository::ApiClient;
use travel_offers::routes::{configure, not_found};
use travel_offers::session::session_middleware;

/// Nothing listens on the discard port, so every API call fails fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

/// Token handed out by [`FakeApi`] for the default admin credentials.
pub const FAKE_TOKEN: &str = "tok";

pub const CATEGORY_IN_USE: &str = "Cannot delete category that is being used by travel offers";

const TEST_SECRET: &[u8] = b"integration-test-secret-with-enough-bytes";

pub fn templates() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
        .expect("templates should parse")
}

/// Full application wired like the binary, talking to an API that is down.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    test_app_with_api(UNREACHABLE_API)
}

/// Full application wired like the binary, talking to the API at `api_url`.
pub fn test_app_with_api(
    api_url: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let key = Key::derive_from(TEST_SECRET);
    let message_store = CookieMessageStore::builder(key.clone()).build();
    let api = ApiClient::new(api_url).expect("valid API url");

    App::new()
        .wrap(FlashMessagesFramework::builder(message_store).build())
        .wrap(session_middleware(key, false))
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(templates()))
        .configure(configure)
        .default_service(web::route().to(not_found))
}

/// One request as received by [`FakeApi`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    fn push(&self, request: RecordedRequest) {
        self.0.lock().expect("recorder lock").push(request);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().expect("recorder lock").clone()
    }

    /// Last request received for `method` and `path`.
    pub fn last(&self, method: &str, path: &str) -> RecordedRequest {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .unwrap_or_else(|| panic!("no {method} {path} request was received"))
    }
}

/// In-process stand-in for the travel offers REST API on an ephemeral port.
pub struct FakeApi {
    pub base_url: String,
    pub recorder: Recorder,
}

impl FakeApi {
    pub async fn start() -> Self {
        let recorder = Recorder::default();
        let data = web::Data::new(recorder.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("fake API should bind");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            base_url: format!("http://{addr}/api"),
            recorder,
        }
    }
}

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn offer() -> Value {
    json!({
        "id": "o1",
        "title": "Overwater Villa Escape",
        "destination": "Maldives",
        "description": "Seven nights over the lagoon",
        "price": 0,
        "category": "Luxury",
        "company_name": "Atoll Travels",
        "company_website": "https://atoll.example",
        "images": [],
        "travel_dates": {"start_date": "2025-09-10", "end_date": "2025-09-17"},
        "created_at": "2025-01-01T00:00:00"
    })
}

fn advertisement(is_active: bool) -> Value {
    json!({
        "id": "ad1",
        "title": "Spa week",
        "image_url": "https://img.example/spa.png",
        "link_url": "https://spa.example",
        "placement": {"location": "sidebar"},
        "is_active": is_active,
        "created_at": "2025-01-01T00:00:00+00:00"
    })
}

async fn respond(
    req: HttpRequest,
    body: web::Bytes,
    recorder: web::Data<Recorder>,
) -> HttpResponse {
    let authorization = header_value(&req, header::AUTHORIZATION);
    let body = String::from_utf8_lossy(&body).into_owned();
    recorder.push(RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        authorization: authorization.clone(),
        content_type: header_value(&req, header::CONTENT_TYPE),
        body: body.clone(),
    });

    let expected = format!("Bearer {FAKE_TOKEN}");
    let is_admin = authorization.as_deref() == Some(expected.as_str());
    let unauthorized = || {
        HttpResponse::Unauthorized().json(json!({"detail": "Could not validate credentials"}))
    };

    match (req.method().as_str(), req.path()) {
        ("POST", "/api/admin/login") => {
            if body == "username=admin&password=admin123" {
                HttpResponse::Ok().json(json!({"access_token": FAKE_TOKEN, "token_type": "bearer"}))
            } else {
                HttpResponse::Unauthorized()
                    .json(json!({"detail": "Incorrect username or password"}))
            }
        }
        ("GET", "/api/offers") => HttpResponse::Ok().json(json!([offer()])),
        ("GET", "/api/admin/categories") if is_admin => HttpResponse::Ok().json(json!([
            {
                "id": "c1",
                "name": "Beach",
                "description": "Sun and sand",
                "created_at": "2025-01-01T00:00:00"
            }
        ])),
        ("DELETE", "/api/admin/categories/c1") if is_admin => {
            HttpResponse::BadRequest().json(json!({"detail": CATEGORY_IN_USE}))
        }
        ("PUT", "/api/admin/advertisements/ad1") if is_admin => {
            let is_active = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|patch| patch["is_active"].as_bool())
                .unwrap_or(true);
            HttpResponse::Ok().json(advertisement(is_active))
        }
        (_, path) if path.starts_with("/api/admin/") && !is_admin => unauthorized(),
        _ => HttpResponse::NotFound().json(json!({"detail": "Not found"})),
    }
}
