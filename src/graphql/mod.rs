//! GraphQL schema, resolvers and HTTP transport for the registry.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server on http://127.0.0.1:4000/graphql
//! carledger serve
//!
//! # Execute a query against a running server
//! carledger query '{ people { id firstName cars { make model } } }'
//!
//! # Execute a mutation (wrapped in `mutation { }`)
//! carledger mutate 'addPerson(firstName: "Ann", lastName: "Lee") { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `people`, `cars`, `personWithcars`, `carMakes`, `carModels`
//! - **Mutations**: `addPerson`, `updatePerson`, `deletePerson`, `addCar`,
//!   `updateCar`, `deleteCar`, `deleteAllPeople`, `deleteAllCars`

mod schema;
mod server;
mod types;

pub use schema::{AppState, LedgerSchema, MutationRoot, QueryRoot, build_schema};
pub use server::{router, run_server, serve};
pub use types::*;
