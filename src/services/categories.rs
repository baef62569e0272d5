use crate::domain::auth::AdminSession;
use crate::domain::category::NewCategory;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult, ensure_admin};

/// Result of a confirmed category deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDeletion {
    Deleted,
    /// The API refused because offers still use the category.
    InUse,
    Failed,
}

fn parse_category_id(id: &str) -> ServiceResult<CategoryId> {
    CategoryId::new(id).map_err(|_| ServiceError::NotFound)
}

pub async fn show_categories<R>(session: &AdminSession, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    ensure_admin(session)?;

    match repo.list_categories().await {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub async fn add_category<R>(
    form: CategoryForm,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryWriter,
{
    ensure_admin(session)?;

    let category = NewCategory::try_from(form)?;
    match repo.create_category(&category).await {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Ok(false)
        }
    }
}

pub async fn update_category<R>(
    category_id: &str,
    form: CategoryForm,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: CategoryWriter,
{
    ensure_admin(session)?;

    let category_id = parse_category_id(category_id)?;
    let category = NewCategory::try_from(form)?;
    match repo.update_category(&category_id, &category).await {
        Ok(_) => Ok(true),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update category {category_id}: {e}");
            Ok(false)
        }
    }
}

pub async fn delete_category<R>(
    category_id: &str,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<CategoryDeletion>
where
    R: CategoryWriter,
{
    ensure_admin(session)?;

    let category_id = parse_category_id(category_id)?;
    match repo.delete_category(&category_id).await {
        Ok(()) => Ok(CategoryDeletion::Deleted),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(RepositoryError::Rejected { status: 400, detail }) => {
            log::warn!("Category {category_id} is still in use: {detail}");
            Ok(CategoryDeletion::InUse)
        }
        Err(e) => {
            log::error!("Failed to delete category {category_id}: {e}");
            Ok(CategoryDeletion::Failed)
        }
    }
}
