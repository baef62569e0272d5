use serde::Serialize;

use crate::domain::advertisement::{
    Advertisement, AdvertisementQuery, NewAdvertisement, group_active_by_location,
};
use crate::domain::auth::AdminSession;
use crate::domain::types::{AdLocation, AdvertisementId};
use crate::dto::advertisements::{AdvertisementDto, PlacementGroupDto};
use crate::forms::advertisements::AdvertisementForm;
use crate::repository::{AdvertisementReader, AdvertisementWriter, RepositoryError};

use super::{ServiceError, ServiceResult, ensure_admin};

/// Everything the advertisements tab shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvertisementOverview {
    pub advertisements: Vec<AdvertisementDto>,
    /// Active advertisements grouped by placement.
    pub placements: Vec<PlacementGroupDto>,
}

/// Active advertisements for the public listing page slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicPlacements {
    pub hero: Vec<AdvertisementDto>,
    pub sidebar: Vec<AdvertisementDto>,
    pub footer: Vec<AdvertisementDto>,
}

fn parse_advertisement_id(id: &str) -> ServiceResult<AdvertisementId> {
    AdvertisementId::new(id).map_err(|_| ServiceError::NotFound)
}

fn placed_at(ads: &[Advertisement], location: AdLocation) -> Vec<AdvertisementDto> {
    ads.iter()
        .filter(|ad| ad.is_active && ad.placement.location == location)
        .map(AdvertisementDto::from)
        .collect()
}

pub async fn show_advertisements<R>(
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<AdvertisementOverview>
where
    R: AdvertisementReader,
{
    ensure_admin(session)?;

    let ads = match repo.list_advertisements(&AdvertisementQuery::all()).await {
        Ok(ads) => ads,
        Err(e) => {
            log::error!("Failed to list advertisements: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(AdvertisementOverview {
        advertisements: ads.iter().map(AdvertisementDto::from).collect(),
        placements: group_active_by_location(&ads)
            .into_iter()
            .map(PlacementGroupDto::from)
            .collect(),
    })
}

/// Raw advertisement used to prefill the edit form.
pub async fn load_advertisement<R>(
    advertisement_id: &str,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<Advertisement>
where
    R: AdvertisementReader,
{
    ensure_admin(session)?;

    let advertisement_id = parse_advertisement_id(advertisement_id)?;
    match repo.get_advertisement_by_id(&advertisement_id).await {
        Ok(Some(ad)) => Ok(ad),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get advertisement {advertisement_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Hero, sidebar and footer slots of the listing page. Failures leave the
/// slots empty.
pub async fn show_public_placements<R>(repo: &R) -> PublicPlacements
where
    R: AdvertisementReader,
{
    match repo
        .list_advertisements(&AdvertisementQuery::active(None))
        .await
    {
        Ok(ads) => PublicPlacements {
            hero: placed_at(&ads, AdLocation::Hero),
            sidebar: placed_at(&ads, AdLocation::Sidebar),
            footer: placed_at(&ads, AdLocation::Footer),
        },
        Err(e) => {
            log::error!("Failed to load advertisements: {e}");
            PublicPlacements::default()
        }
    }
}

/// Active advertisements shown next to an offer.
pub async fn show_offer_detail_advertisements<R>(repo: &R) -> Vec<AdvertisementDto>
where
    R: AdvertisementReader,
{
    let query = AdvertisementQuery::active(Some(AdLocation::OfferDetail));
    match repo.list_advertisements(&query).await {
        Ok(ads) => placed_at(&ads, AdLocation::OfferDetail),
        Err(e) => {
            log::error!("Failed to load offer detail advertisements: {e}");
            Vec::new()
        }
    }
}

pub async fn add_advertisement<R>(
    form: AdvertisementForm,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: AdvertisementWriter,
{
    ensure_admin(session)?;

    let advertisement = NewAdvertisement::try_from(form)?;
    match repo.create_advertisement(&advertisement).await {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to create advertisement: {e}");
            Ok(false)
        }
    }
}

pub async fn update_advertisement<R>(
    advertisement_id: &str,
    form: AdvertisementForm,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: AdvertisementWriter,
{
    ensure_admin(session)?;

    let advertisement_id = parse_advertisement_id(advertisement_id)?;
    let advertisement = NewAdvertisement::try_from(form)?;
    match repo
        .update_advertisement(&advertisement_id, &advertisement)
        .await
    {
        Ok(_) => Ok(true),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update advertisement {advertisement_id}: {e}");
            Ok(false)
        }
    }
}

/// Flip the active flag, leaving every other field untouched.
pub async fn toggle_advertisement<R>(
    advertisement_id: &str,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: AdvertisementReader + AdvertisementWriter,
{
    ensure_admin(session)?;

    let advertisement_id = parse_advertisement_id(advertisement_id)?;
    let current = match repo.get_advertisement_by_id(&advertisement_id).await {
        Ok(Some(ad)) => ad,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get advertisement {advertisement_id}: {e}");
            return Ok(false);
        }
    };

    match repo
        .set_advertisement_active(&advertisement_id, !current.is_active)
        .await
    {
        Ok(_) => Ok(true),
        Err(e) => {
            log::error!("Failed to toggle advertisement {advertisement_id}: {e}");
            Ok(false)
        }
    }
}

pub async fn delete_advertisement<R>(
    advertisement_id: &str,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<bool>
where
    R: AdvertisementWriter,
{
    ensure_admin(session)?;

    let advertisement_id = parse_advertisement_id(advertisement_id)?;
    match repo.delete_advertisement(&advertisement_id).await {
        Ok(()) => Ok(true),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to delete advertisement {advertisement_id}: {e}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advertisement::AdPlacement;
    use crate::domain::types::AccessToken;
    use crate::repository::test::TestRepository;

    fn admin() -> AdminSession {
        AdminSession::authenticated(AccessToken::new("token").unwrap())
    }

    fn ad(id: &str, location: AdLocation, is_active: bool) -> Advertisement {
        Advertisement {
            id: AdvertisementId::new(id).unwrap(),
            title: format!("Ad {id}"),
            description: Some("Partner deal".into()),
            image_url: "https://img.example/ad.png".into(),
            link_url: "https://partner.example".into(),
            placement: AdPlacement {
                location,
                description: Some("Top of page".into()),
            },
            is_active,
            created_at: None,
            updated_at: None,
        }
    }

    fn repo() -> TestRepository {
        TestRepository::new(vec![]).with_advertisements(vec![
            ad("a1", AdLocation::Hero, true),
            ad("a2", AdLocation::Sidebar, false),
            ad("a3", AdLocation::OfferDetail, true),
            ad("a4", AdLocation::Footer, true),
        ])
    }

    #[actix_web::test]
    async fn toggle_only_changes_active_flag() {
        let repo = repo();
        let before = repo.advertisements()[1].clone();

        assert_eq!(toggle_advertisement("a2", &admin(), &repo).await, Ok(true));

        let after = repo.advertisements()[1].clone();
        assert!(after.is_active);
        assert_eq!(Advertisement { is_active: false, ..after }, before);

        let overview = show_advertisements(&admin(), &repo).await.unwrap();
        let sidebar = &overview.placements[1];
        assert_eq!(sidebar.location, "sidebar");
        assert!(sidebar.advertisements.iter().any(|ad| ad.id == "a2"));

        assert_eq!(toggle_advertisement("a2", &admin(), &repo).await, Ok(true));

        let overview = show_advertisements(&admin(), &repo).await.unwrap();
        assert!(overview.placements[1].advertisements.is_empty());
        assert!(!overview.advertisements[1].is_active);
    }

    #[actix_web::test]
    async fn overview_lists_all_and_previews_active() {
        let overview = show_advertisements(&admin(), &repo()).await.unwrap();

        assert_eq!(overview.advertisements.len(), 4);
        let locations: Vec<_> = overview.placements.iter().map(|g| g.location).collect();
        assert_eq!(locations, vec!["hero", "sidebar", "offer_detail", "footer"]);
        assert!(overview.placements[1].advertisements.is_empty());
        assert_eq!(overview.placements[2].advertisements[0].id, "a3");
    }

    #[actix_web::test]
    async fn public_slots_only_hold_active_ads() {
        let placements = show_public_placements(&repo()).await;
        assert_eq!(placements.hero.len(), 1);
        assert!(placements.sidebar.is_empty());
        assert_eq!(placements.footer[0].id, "a4");

        let detail = show_offer_detail_advertisements(&repo()).await;
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].location, "offer_detail");

        assert_eq!(
            show_public_placements(&TestRepository::failing()).await,
            PublicPlacements::default()
        );
    }

    #[actix_web::test]
    async fn anonymous_session_cannot_modify_ads() {
        let repo = repo();
        let anonymous = AdminSession::anonymous();

        assert_eq!(
            toggle_advertisement("a1", &anonymous, &repo).await,
            Err(ServiceError::Unauthorized)
        );
        assert_eq!(
            add_advertisement(AdvertisementForm::default(), &anonymous, &repo).await,
            Err(ServiceError::Unauthorized)
        );
        assert_eq!(repo.calls(), 0);
    }

    #[actix_web::test]
    async fn creates_and_deletes_advertisement() {
        let repo = repo();
        let form = AdvertisementForm {
            title: "Spa week".into(),
            image_url: "https://img.example/spa.png".into(),
            link_url: "https://spa.example".into(),
            location: "sidebar".into(),
            ..AdvertisementForm::default()
        };

        assert_eq!(add_advertisement(form, &admin(), &repo).await, Ok(true));
        let created = repo.advertisements().last().cloned().unwrap();
        assert!(created.is_active);

        assert_eq!(
            delete_advertisement(created.id.as_str(), &admin(), &repo).await,
            Ok(true)
        );
        assert_eq!(repo.advertisements().len(), 4);
    }

    #[actix_web::test]
    async fn toggling_missing_ad_is_not_found() {
        assert_eq!(
            toggle_advertisement("nope", &admin(), &repo()).await,
            Err(ServiceError::NotFound)
        );
    }
}
