//! # carledger - an in-memory people and car registry
//!
//! carledger keeps a list of people and the cars they own in process memory
//! and serves it over GraphQL. Nothing is persisted: the registry starts empty
//! and is gone when the process exits.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve http://127.0.0.1:4000/graphql
//! carledger serve
//!
//! # Add a person and a car
//! carledger mutate 'addPerson(firstName: "Ann", lastName: "Lee") { id }'
//! carledger mutate 'addCar(year: 2020, make: "Honda", model: "Civic", price: 15000, personId: "1") { id }'
//!
//! # Browse
//! carledger query '{ people { firstName cars { make model } } }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`model`]: Data models (Person, Car, Make)
//! - [`storage`]: The in-memory registry
//! - [`catalog`]: Vehicle make catalog
//! - [`lookup`]: Vehicle model lookup via vPIC

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.carledger.yml` configuration files.
pub mod config;

/// Error types and result aliases.
///
/// Defines `RegistryError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema, resolvers and HTTP transport.
pub mod graphql;

/// Data models for the registry.
pub mod model;

/// In-memory storage layer.
pub mod storage;

/// Input validation used in strict mode.
pub mod validation;

pub mod catalog;
pub mod logging;
pub mod lookup;

/// Install the process-wide rustls crypto provider. Safe to call repeatedly.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
