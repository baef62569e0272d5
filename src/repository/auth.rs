use async_trait::async_trait;

use crate::domain::auth::{Credentials, MessageResponse, TokenResponse};
use crate::domain::types::AccessToken;
use crate::repository::{AdminAuth, ApiClient, RepositoryResult};

#[async_trait]
impl AdminAuth for ApiClient {
    async fn login(&self, credentials: &Credentials) -> RepositoryResult<AccessToken> {
        let url = self.url("admin/login")?;
        // OAuth2 password flow: the API expects a form-encoded body.
        let request = self.http.post(url).form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]);
        let response: TokenResponse = self.fetch_json(request).await?;
        Ok(response.access_token)
    }

    async fn create_default_admin(&self) -> RepositoryResult<String> {
        let url = self.url("admin/create-default-admin")?;
        let response: MessageResponse = self.fetch_json(self.http.post(url)).await?;
        Ok(response.message)
    }
}
