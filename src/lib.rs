#![doc = "The `taskhub` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, authentication and authorization"]
#![doc = "mechanisms, store interfaces, routing configuration, and error handling for"]
#![doc = "the taskhub API. It is used by the main binary (`main.rs`) to construct and"]
#![doc = "run the application, and by the integration tests to assemble the same app"]
#![doc = "against in-memory stores."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
