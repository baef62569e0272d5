//! Conversions from form errors into [`ServiceError`].
//!
//! Forms live in the `data` feature and must not depend on the service
//! layer, so the glue sits here.

use crate::forms::advertisements::AdvertisementFormError;
use crate::forms::categories::CategoryFormError;
use crate::forms::offers::OfferFormError;
use crate::services::ServiceError;

impl From<OfferFormError> for ServiceError {
    fn from(val: OfferFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CategoryFormError> for ServiceError {
    fn from(val: CategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<AdvertisementFormError> for ServiceError {
    fn from(val: AdvertisementFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
