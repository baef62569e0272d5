use async_trait::async_trait;

use crate::domain::category::CategoryNames;
use crate::domain::offer::{NewOffer, Offer, OfferFilter};
use crate::domain::types::OfferId;
use crate::repository::{ApiClient, OfferReader, OfferWriter, RepositoryError, RepositoryResult};

#[async_trait]
impl OfferReader for ApiClient {
    async fn list_offers(&self, filter: &OfferFilter) -> RepositoryResult<Vec<Offer>> {
        let url = self.offers_url(filter)?;
        log::debug!("Fetching offers from {url}");
        self.fetch_json(self.authorize(self.http.get(url))).await
    }

    async fn get_offer_by_id(&self, id: &OfferId) -> RepositoryResult<Option<Offer>> {
        let url = self.url(&format!("offers/{id}"))?;
        match self.fetch_json(self.authorize(self.http.get(url))).await {
            Ok(offer) => Ok(Some(offer)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_offer_categories(&self) -> RepositoryResult<Vec<String>> {
        let url = self.url("categories")?;
        let names: CategoryNames = self.fetch_json(self.http.get(url)).await?;
        Ok(names.categories)
    }
}

#[async_trait]
impl OfferWriter for ApiClient {
    async fn create_offer(&self, offer: &NewOffer) -> RepositoryResult<Offer> {
        let url = self.url("admin/offers")?;
        let request = self.authorize_admin(self.http.post(url))?.json(offer);
        self.fetch_json(request).await
    }

    async fn update_offer(&self, id: &OfferId, offer: &NewOffer) -> RepositoryResult<Offer> {
        let url = self.url(&format!("admin/offers/{id}"))?;
        let request = self.authorize_admin(self.http.put(url))?.json(offer);
        self.fetch_json(request).await
    }

    async fn delete_offer(&self, id: &OfferId) -> RepositoryResult<()> {
        let url = self.url(&format!("admin/offers/{id}"))?;
        self.execute(self.authorize_admin(self.http.delete(url))?).await
    }
}
