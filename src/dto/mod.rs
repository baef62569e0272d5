//! Serializable views handed to templates.

pub mod advertisements;
pub mod categories;
pub mod offers;
