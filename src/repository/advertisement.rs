use async_trait::async_trait;

use crate::domain::advertisement::{
    Advertisement, AdvertisementActivePatch, AdvertisementQuery, NewAdvertisement,
};
use crate::domain::types::AdvertisementId;
use crate::repository::{
    AdvertisementReader, AdvertisementWriter, ApiClient, RepositoryError, RepositoryResult,
};

#[async_trait]
impl AdvertisementReader for ApiClient {
    async fn list_advertisements(
        &self,
        query: &AdvertisementQuery,
    ) -> RepositoryResult<Vec<Advertisement>> {
        let url = self.url_with_query("advertisements", &query.query_pairs())?;
        self.fetch_json(self.authorize(self.http.get(url))).await
    }

    async fn get_advertisement_by_id(
        &self,
        id: &AdvertisementId,
    ) -> RepositoryResult<Option<Advertisement>> {
        let url = self.url(&format!("advertisements/{id}"))?;
        match self.fetch_json(self.authorize(self.http.get(url))).await {
            Ok(advertisement) => Ok(Some(advertisement)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl AdvertisementWriter for ApiClient {
    async fn create_advertisement(
        &self,
        advertisement: &NewAdvertisement,
    ) -> RepositoryResult<Advertisement> {
        let url = self.url("admin/advertisements")?;
        let request = self.authorize_admin(self.http.post(url))?.json(advertisement);
        self.fetch_json(request).await
    }

    async fn update_advertisement(
        &self,
        id: &AdvertisementId,
        advertisement: &NewAdvertisement,
    ) -> RepositoryResult<Advertisement> {
        let url = self.url(&format!("admin/advertisements/{id}"))?;
        let request = self.authorize_admin(self.http.put(url))?.json(advertisement);
        self.fetch_json(request).await
    }

    async fn set_advertisement_active(
        &self,
        id: &AdvertisementId,
        is_active: bool,
    ) -> RepositoryResult<Advertisement> {
        let url = self.url(&format!("admin/advertisements/{id}"))?;
        let request = self
            .authorize_admin(self.http.put(url))?
            .json(&AdvertisementActivePatch { is_active });
        self.fetch_json(request).await
    }

    async fn delete_advertisement(&self, id: &AdvertisementId) -> RepositoryResult<()> {
        let url = self.url(&format!("admin/advertisements/{id}"))?;
        self.execute(self.authorize_admin(self.http.delete(url))?).await
    }
}
