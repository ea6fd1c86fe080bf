use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub price: f64,
    pub person_id: String,
}

/// Fields supplied when adding a car; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub price: f64,
    pub person_id: String,
}

impl NewCar {
    pub fn into_car(self, id: String) -> Car {
        Car {
            id,
            year: self.year,
            make: self.make,
            model: self.model,
            price: self.price,
            person_id: self.person_id,
        }
    }
}

/// Partial update for a car.
///
/// Numbers are applied whenever present, so a price of `0.0` is a real value.
/// Strings are skipped when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarPatch {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub person_id: Option<String>,
}

impl CarPatch {
    /// The new owner, if the patch reassigns one.
    pub fn new_owner(&self) -> Option<&str> {
        self.person_id.as_deref().filter(|s| !s.is_empty())
    }
}

impl Car {
    pub fn apply(&mut self, patch: CarPatch) {
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(make) = patch.make.filter(|s| !s.is_empty()) {
            self.make = make;
        }
        if let Some(model) = patch.model.filter(|s| !s.is_empty()) {
            self.model = model;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(person_id) = patch.person_id.filter(|s| !s.is_empty()) {
            self.person_id = person_id;
        }
    }
}
