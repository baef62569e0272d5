use crate::domain::auth::AdminSession;
use crate::domain::offer::{NewOffer, Offer, OfferFilter};
use crate::domain::types::OfferId;
use crate::dto::offers::{OfferCardDto, OfferDetailDto};
use crate::forms::offers::{OfferForm, OfferFormMode};
use crate::repository::{OfferReader, OfferWriter, RepositoryError};

use super::{ServiceError, ServiceResult, ensure_admin};

fn parse_offer_id(id: &str) -> ServiceResult<OfferId> {
    OfferId::new(id).map_err(|_| ServiceError::NotFound)
}

/// Offers matching `filter`, in the order the API returned them.
pub async fn show_offers<R>(filter: &OfferFilter, repo: &R) -> ServiceResult<Vec<OfferCardDto>>
where
    R: OfferReader,
{
    match repo.list_offers(filter).await {
        Ok(offers) => Ok(offers.iter().map(OfferCardDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list offers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Category names for the filter selector. Failures leave it empty.
pub async fn show_filter_categories<R>(repo: &R) -> Vec<String>
where
    R: OfferReader,
{
    repo.list_offer_categories().await.unwrap_or_else(|e| {
        log::error!("Failed to list offer categories: {e}");
        Vec::new()
    })
}

pub async fn show_offer<R>(offer_id: &str, repo: &R) -> ServiceResult<OfferDetailDto>
where
    R: OfferReader,
{
    let offer_id = parse_offer_id(offer_id)?;

    match repo.get_offer_by_id(&offer_id).await {
        Ok(Some(offer)) => Ok(OfferDetailDto::from(&offer)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get offer {offer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Offers listed on the dashboard.
pub async fn show_admin_offers<R>(
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<Vec<OfferCardDto>>
where
    R: OfferReader,
{
    ensure_admin(session)?;
    show_offers(&OfferFilter::default(), repo).await
}

/// Initial values of the offer form for `mode`.
pub async fn load_offer_form<R>(
    mode: &OfferFormMode,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<OfferForm>
where
    R: OfferReader,
{
    ensure_admin(session)?;

    let offer_id = match mode {
        OfferFormMode::Create => return Ok(OfferForm::default()),
        OfferFormMode::Edit(offer_id) => offer_id,
    };

    match repo.get_offer_by_id(offer_id).await {
        Ok(Some(offer)) => Ok(OfferForm::from(&offer)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to load offer {offer_id} for editing: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Validate the form and create or replace the offer depending on `mode`.
///
/// Returns the offer stored by the API, or `None` when the API call failed.
pub async fn submit_offer<R>(
    mode: &OfferFormMode,
    form: OfferForm,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<Option<Offer>>
where
    R: OfferWriter,
{
    ensure_admin(session)?;

    let payload = NewOffer::try_from(form)?;
    let result = match mode {
        OfferFormMode::Create => repo.create_offer(&payload).await,
        OfferFormMode::Edit(offer_id) => repo.update_offer(offer_id, &payload).await,
    };

    match result {
        Ok(offer) => Ok(Some(offer)),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to save offer: {e}");
            Ok(None)
        }
    }
}

pub async fn delete_offer<R>(
    offer_id: &str,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: OfferWriter,
{
    ensure_admin(session)?;
    let offer_id = parse_offer_id(offer_id)?;

    match repo.delete_offer(&offer_id).await {
        Ok(()) => Ok(true),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to delete offer {offer_id}: {e}");
            Ok(false)
        }
    }
}
