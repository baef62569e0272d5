pub mod advertisements;
pub mod auth;
pub mod categories;
pub mod offers;
