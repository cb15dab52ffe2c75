//! Client library for the Pothik travel booking backend.
//!
//! Wraps the REST API behind typed calls and drives the two interactive
//! flows on top of it: assembling a custom trip ([`TripPlanner`]) and
//! booking a fixed package through the mobile wallet ([`Checkout`]).

pub mod api;
pub mod config;
pub mod flows;
pub mod models;
pub mod services;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use config::ApiConfig;
pub use flows::{Checkout, TripPlanner, TripSelection};
pub use session::Session;
