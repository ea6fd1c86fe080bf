//! Data models for the registry.
//!
//! - [`Person`]: an owner of cars
//! - [`Car`]: a vehicle owned by a person
//! - [`Make`]: a vehicle manufacturer from the bundled catalog
//!
//! Patches ([`PersonPatch`], [`CarPatch`]) carry partial updates. A field left
//! as `None` is not touched.

mod car;
mod make;
mod person;

pub use car::{Car, CarPatch, NewCar};
pub use make::{Make, MakeDataset};
pub use person::{Person, PersonPatch};
