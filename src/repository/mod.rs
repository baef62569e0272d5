use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::advertisement::{Advertisement, AdvertisementQuery, NewAdvertisement};
use crate::domain::auth::{AdminSession, Credentials};
use crate::domain::category::{Category, NewCategory};
use crate::domain::offer::{NewOffer, Offer, OfferFilter};
use crate::domain::types::{AccessToken, AdvertisementId, CategoryId, OfferId};

pub mod advertisement;
pub mod auth;
pub mod category;
pub mod errors;
pub mod offer;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by the travel offers REST API.
///
/// The inner `reqwest::Client` shares its connection pool between clones, so
/// the client is registered once as app data and re-bound to the caller's
/// session per request with [`ApiClient::with_session`].
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: AdminSession,
}

impl ApiClient {
    /// Create an anonymous client for the API rooted at `base_url`
    /// (for example `http://localhost:8001/api`).
    pub fn new(base_url: impl Into<String>) -> RepositoryResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        // Fail fast on a malformed base URL instead of on the first request.
        Url::parse(&base_url)?;

        Ok(Self {
            http: Client::builder().build()?,
            base_url,
            session: AdminSession::anonymous(),
        })
    }

    /// Copy of this client that authenticates as `session`.
    pub fn with_session(&self, session: &AdminSession) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session: session.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `admin/offers`.
    pub fn url(&self, path: &str) -> RepositoryResult<Url> {
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{path}", self.base_url))?)
    }

    fn url_with_query(&self, path: &str, pairs: &[(&str, String)]) -> RepositoryResult<Url> {
        let mut url = self.url(path)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Listing URL for `filter`; unset criteria are left out.
    pub fn offers_url(&self, filter: &OfferFilter) -> RepositoryResult<Url> {
        self.url_with_query("offers", &filter.query_pairs())
    }

    fn token(&self) -> RepositoryResult<&AccessToken> {
        self.session.token().ok_or(RepositoryError::MissingToken)
    }

    /// Attach the bearer token when the session carries one.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    /// Like [`Self::authorize`], but refuses to build admin requests without
    /// a token.
    fn authorize_admin(&self, request: RequestBuilder) -> RepositoryResult<RequestBuilder> {
        let token = self.token()?;
        Ok(request.bearer_auth(token.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }

    async fn fetch_json<T>(&self, request: RequestBuilder) -> RepositoryResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    /// Send a request whose response body is irrelevant.
    async fn execute(&self, request: RequestBuilder) -> RepositoryResult<()> {
        self.send(request).await.map(|_| ())
    }
}

/// Turn a non-success response into a [`RepositoryError`].
///
/// The API reports problems as `{"detail": ...}`; `detail` is a string for
/// domain errors and a list for request validation errors.
fn map_status_error(status: StatusCode, body: &[u8]) -> RepositoryError {
    if status == StatusCode::NOT_FOUND {
        return RepositoryError::NotFound;
    }

    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    RepositoryError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

/// Read-only operations on travel offers.
#[async_trait]
pub trait OfferReader {
    /// List offers matching `filter`, in the order returned by the API.
    async fn list_offers(&self, filter: &OfferFilter) -> RepositoryResult<Vec<Offer>>;
    /// Retrieve an offer by id; `None` when the API reports 404.
    async fn get_offer_by_id(&self, id: &OfferId) -> RepositoryResult<Option<Offer>>;
    /// Distinct category names used by offers, for the filter selector.
    async fn list_offer_categories(&self) -> RepositoryResult<Vec<String>>;
}

/// Admin operations on travel offers.
#[async_trait]
pub trait OfferWriter {
    async fn create_offer(&self, offer: &NewOffer) -> RepositoryResult<Offer>;
    /// Replace every field of an existing offer.
    async fn update_offer(&self, id: &OfferId, offer: &NewOffer) -> RepositoryResult<Offer>;
    async fn delete_offer(&self, id: &OfferId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CategoryReader {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

#[async_trait]
pub trait CategoryWriter {
    async fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    async fn update_category(
        &self,
        id: &CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<Category>;
    /// The API answers 400 when offers still reference the category.
    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AdvertisementReader {
    async fn list_advertisements(
        &self,
        query: &AdvertisementQuery,
    ) -> RepositoryResult<Vec<Advertisement>>;
    async fn get_advertisement_by_id(
        &self,
        id: &AdvertisementId,
    ) -> RepositoryResult<Option<Advertisement>>;
}

#[async_trait]
pub trait AdvertisementWriter {
    async fn create_advertisement(
        &self,
        advertisement: &NewAdvertisement,
    ) -> RepositoryResult<Advertisement>;
    async fn update_advertisement(
        &self,
        id: &AdvertisementId,
        advertisement: &NewAdvertisement,
    ) -> RepositoryResult<Advertisement>;
    /// Partial update that only changes `is_active`.
    async fn set_advertisement_active(
        &self,
        id: &AdvertisementId,
        is_active: bool,
    ) -> RepositoryResult<Advertisement>;
    async fn delete_advertisement(&self, id: &AdvertisementId) -> RepositoryResult<()>;
}

/// Authentication endpoints.
#[async_trait]
pub trait AdminAuth {
    /// Exchange credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AccessToken>;
    /// Ask the API to create the well-known default admin; returns the API's
    /// message.
    async fn create_default_admin(&self) -> RepositoryResult<String>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::types::{SortField, SortOrder};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8001/api/").unwrap()
    }

    #[test]
    fn builds_filtered_offer_listing_url() {
        let filter = OfferFilter {
            category: Some("Beach".into()),
            min_price: Some(Decimal::new(100, 0)),
            sort_by: SortField::Price,
            sort_order: SortOrder::Asc,
            ..OfferFilter::default()
        };

        assert_eq!(
            client().offers_url(&filter).unwrap().as_str(),
            "http://localhost:8001/api/offers?category=Beach&min_price=100&sort_by=price&sort_order=asc"
        );
    }

    #[test]
    fn encodes_filter_values() {
        let filter = OfferFilter {
            destination: Some("North Malé & Atoll".into()),
            sort_by: SortField::TravelStartDate,
            ..OfferFilter::default()
        };

        let url = client().offers_url(&filter).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("destination".into(), "North Malé & Atoll".into()));
        assert_eq!(
            pairs[1],
            ("sort_by".into(), "travel_dates.start_date".into())
        );
    }

    #[test]
    fn rejects_malformed_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(RepositoryError::InvalidUrl(_))
        ));
    }

    #[test]
    fn with_session_keeps_base_url() {
        let token = AccessToken::new("abc").unwrap();
        let bound = client().with_session(&AdminSession::authenticated(token));
        assert!(bound.session.is_authenticated());
        assert_eq!(bound.base_url(), "http://localhost:8001/api");
        assert!(!client().session.is_authenticated());
    }

    #[test]
    fn maps_detail_of_rejected_requests() {
        let err = map_status_error(
            StatusCode::BAD_REQUEST,
            br#"{"detail": "Cannot delete category that is being used by travel offers"}"#,
        );
        assert!(matches!(
            err,
            RepositoryError::Rejected { status: 400, ref detail }
                if detail == "Cannot delete category that is being used by travel offers"
        ));

        assert!(matches!(
            map_status_error(StatusCode::NOT_FOUND, b""),
            RepositoryError::NotFound
        ));

        let err = map_status_error(StatusCode::UNAUTHORIZED, b"not json");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn admin_requests_require_a_token() {
        let api = client();
        let request = api.http.get("http://localhost:8001/api/admin/categories");
        assert!(matches!(
            api.authorize_admin(request),
            Err(RepositoryError::MissingToken)
        ));
    }
}
