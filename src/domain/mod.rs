//! Domain entities and value types shared by forms, services and the API
//! client.

pub mod advertisement;
pub mod auth;
pub mod category;
pub mod offer;
pub mod types;
