//! Core library exports for the travel offers web application.
//!
//! The `data` feature exposes the domain types and forms on their own. The
//! `server` feature adds the REST API client, services, routes and the
//! cookie session used by the Actix-web binary.

pub mod domain;
pub mod forms;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod session;
