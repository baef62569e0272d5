use async_trait::async_trait;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::repository::{ApiClient, CategoryReader, CategoryWriter, RepositoryResult};

#[async_trait]
impl CategoryReader for ApiClient {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let url = self.url("admin/categories")?;
        self.fetch_json(self.authorize_admin(self.http.get(url))?).await
    }
}

#[async_trait]
impl CategoryWriter for ApiClient {
    async fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let url = self.url("admin/categories")?;
        let request = self.authorize_admin(self.http.post(url))?.json(category);
        self.fetch_json(request).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<Category> {
        let url = self.url(&format!("admin/categories/{id}"))?;
        let request = self.authorize_admin(self.http.put(url))?.json(category);
        self.fetch_json(request).await
    }

    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()> {
        let url = self.url(&format!("admin/categories/{id}"))?;
        self.execute(self.authorize_admin(self.http.delete(url))?).await
    }
}
