use serde::{Deserialize, Serialize};

use crate::domain::auth::AdminSession;
use crate::dto::categories::CategoryDto;
use crate::dto::offers::OfferCardDto;
use crate::forms::advertisements::AdvertisementForm;
use crate::forms::categories::CategoryForm;
use crate::repository::{AdvertisementReader, CategoryReader, OfferReader};

use super::advertisements::{AdvertisementOverview, load_advertisement, show_advertisements};
use super::categories::show_categories;
use super::offers::show_admin_offers;
use super::{ServiceError, ServiceResult, ensure_admin};

/// Management area shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Offers,
    Categories,
    Ads,
}

impl DashboardTab {
    /// Unknown or missing values select the offers tab.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("categories") => Self::Categories,
            Some("ads") => Self::Ads,
            _ => Self::Offers,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offers => "offers",
            Self::Categories => "categories",
            Self::Ads => "ads",
        }
    }

    /// Dashboard URL with this tab selected.
    pub fn url(self) -> String {
        format!("/admin/dashboard?tab={}", self.as_str())
    }
}

/// Query string of `GET /admin/dashboard`.
///
/// `edit` and `confirm_delete` hold the id of the row being edited or awaiting
/// delete confirmation on the selected tab.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub edit: Option<String>,
    pub confirm_delete: Option<String>,
}

/// Template data of the dashboard page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub tab: DashboardTab,
    pub offers: Vec<OfferCardDto>,
    pub categories: Vec<CategoryDto>,
    pub advertisements: Option<AdvertisementOverview>,
    pub category_form: CategoryForm,
    pub advertisement_form: AdvertisementForm,
    pub editing: Option<String>,
    pub confirm_delete: Option<String>,
    /// The selected tab's data could not be loaded.
    pub load_error: bool,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Keep `Unauthorized` fatal; any other load failure becomes an inline error.
fn tolerate<T>(result: ServiceResult<T>) -> ServiceResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ServiceError::Unauthorized) => Err(ServiceError::Unauthorized),
        Err(_) => Ok(None),
    }
}

pub async fn load_dashboard<R>(
    query: &DashboardQuery,
    session: &AdminSession,
    repo: &R,
) -> ServiceResult<DashboardView>
where
    R: OfferReader + CategoryReader + AdvertisementReader,
{
    ensure_admin(session)?;

    let tab = DashboardTab::parse(query.tab.as_deref());
    let mut view = DashboardView {
        tab,
        editing: non_blank(&query.edit),
        confirm_delete: non_blank(&query.confirm_delete),
        ..DashboardView::default()
    };

    match tab {
        DashboardTab::Offers => match tolerate(show_admin_offers(session, repo).await)? {
            Some(offers) => view.offers = offers,
            None => view.load_error = true,
        },
        DashboardTab::Categories => {
            match tolerate(show_categories(session, repo).await)? {
                Some(categories) => view.categories = categories,
                None => view.load_error = true,
            }
            if let Some(editing) = &view.editing {
                match view.categories.iter().find(|c| &c.id == editing) {
                    Some(category) => {
                        view.category_form = CategoryForm {
                            name: category.name.clone(),
                            description: category.description.clone(),
                        }
                    }
                    None => view.editing = None,
                }
            }
        }
        DashboardTab::Ads => {
            match tolerate(show_advertisements(session, repo).await)? {
                Some(overview) => view.advertisements = Some(overview),
                None => view.load_error = true,
            }
            if let Some(editing) = view.editing.clone() {
                match tolerate(load_advertisement(&editing, session, repo).await)? {
                    Some(ad) => view.advertisement_form = AdvertisementForm::from(&ad),
                    None => view.editing = None,
                }
            }
        }
    }

    Ok(view)
}
