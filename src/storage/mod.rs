//! In-memory storage layer.
//!
//! The [`Registry`] owns both collections and keeps them consistent: deleting a
//! person removes that person's cars. Nothing is persisted; a registry starts
//! empty and is dropped with its owner.
//!
//! ## Components
//!
//! - [`Registry`]: CRUD operations for people and cars
//! - [`IdSequence`]: monotonic string id generator, one per collection
//! - [`SharedRegistry`]: the registry behind an async lock, as served over GraphQL

mod registry;
mod sequence;

pub use registry::{PersonWithCars, Registry, SharedRegistry};
pub use sequence::IdSequence;
