use super::sequence::IdSequence;
use crate::{
    error::{RegistryError, Result},
    model::{Car, CarPatch, NewCar, Person, PersonPatch},
    validation,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// A registry shared between request handlers. Each mutation holds the write
/// lock for its whole duration.
pub type SharedRegistry = Arc<RwLock<Registry>>;

#[derive(Debug, Clone, PartialEq)]
pub struct PersonWithCars {
    pub person: Person,
    pub cars: Vec<Car>,
}

#[derive(Debug, Default)]
pub struct Registry {
    people: Vec<Person>,
    cars: Vec<Car>,
    person_ids: IdSequence,
    car_ids: IdSequence,
    strict: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that validates input and rejects cars without an existing owner.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_strict(strict: bool) -> Self {
        if strict { Self::strict() } else { Self::new() }
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    pub fn list_people(&self) -> &[Person] {
        &self.people
    }

    pub fn list_cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn get_car(&self, id: &str) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }

    /// Cars owned by `person_id`, in insertion order.
    pub fn cars_for_person(&self, person_id: &str) -> Vec<Car> {
        self.cars
            .iter()
            .filter(|c| c.person_id == person_id)
            .cloned()
            .collect()
    }

    pub fn person_with_cars(&self, id: &str) -> Option<PersonWithCars> {
        let person = self.get_person(id)?.clone();
        let cars = self.cars_for_person(id);
        Some(PersonWithCars { person, cars })
    }

    pub fn add_person(&mut self, first_name: String, last_name: String) -> Result<Person> {
        if self.strict {
            validation::validate_person(&first_name, &last_name)?;
        }

        let person = Person::new(self.person_ids.next_id(), first_name, last_name);
        self.people.push(person.clone());
        info!(id = %person.id, "Added person");
        Ok(person)
    }

    pub fn update_person(&mut self, id: &str, patch: PersonPatch) -> Result<Person> {
        let person = self
            .people
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RegistryError::PersonNotFound(id.to_string()))?;

        if self.strict {
            validation::validate_person_patch(&patch)?;
        }
        if patch.is_empty() {
            debug!(%id, "Person update carried no changes");
        }
        person.apply(patch);
        info!(%id, "Updated person");
        Ok(person.clone())
    }

    /// Removes the person and every car they own.
    pub fn delete_person(&mut self, id: &str) -> Option<Person> {
        let index = self.people.iter().position(|p| p.id == id)?;
        let removed = self.people.remove(index);

        let before = self.cars.len();
        self.cars.retain(|c| c.person_id != id);
        info!(
            %id,
            cascaded_cars = before - self.cars.len(),
            "Deleted person"
        );
        Some(removed)
    }

    pub fn add_car(&mut self, new_car: NewCar) -> Result<Car> {
        if self.strict {
            validation::validate_new_car(&new_car)?;
        }
        self.check_owner(&new_car.person_id)?;

        let car = new_car.into_car(self.car_ids.next_id());
        self.cars.push(car.clone());
        info!(id = %car.id, person_id = %car.person_id, "Added car");
        Ok(car)
    }

    pub fn update_car(&mut self, id: &str, patch: CarPatch) -> Result<Car> {
        if self.get_car(id).is_none() {
            return Err(RegistryError::CarNotFound(id.to_string()));
        }
        if self.strict {
            validation::validate_car_patch(&patch)?;
        }
        if let Some(owner) = patch.new_owner() {
            self.check_owner(owner)?;
        }

        let car = self
            .cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RegistryError::CarNotFound(id.to_string()))?;
        car.apply(patch);
        info!(%id, "Updated car");
        Ok(car.clone())
    }

    pub fn delete_car(&mut self, id: &str) -> Option<Car> {
        let index = self.cars.iter().position(|c| c.id == id)?;
        info!(%id, "Deleted car");
        Some(self.cars.remove(index))
    }

    /// Clears people and, since every car references a person, all cars too.
    pub fn delete_all_people(&mut self) -> bool {
        info!(
            people = self.people.len(),
            cars = self.cars.len(),
            "Deleting all people"
        );
        self.people.clear();
        self.cars.clear();
        true
    }

    pub fn delete_all_cars(&mut self) -> bool {
        info!(cars = self.cars.len(), "Deleting all cars");
        self.cars.clear();
        true
    }

    /// Unknown owners are rejected in strict mode and only logged otherwise.
    fn check_owner(&self, person_id: &str) -> Result<()> {
        if self.get_person(person_id).is_some() {
            return Ok(());
        }
        if self.strict {
            return Err(RegistryError::Validation(format!(
                "Owner {} does not exist",
                person_id
            )));
        }
        warn!(%person_id, "Car references a person that does not exist");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_for(person_id: &str, make: &str, model: &str) -> NewCar {
        NewCar {
            year: 2020,
            make: make.to_string(),
            model: model.to_string(),
            price: 15000.0,
            person_id: person_id.to_string(),
        }
    }

    fn setup_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_person("Ann".to_string(), "Lee".to_string())
            .unwrap();
        registry
            .add_person("Bob".to_string(), "Ray".to_string())
            .unwrap();
        registry
    }

    #[test]
    fn test_add_person_assigns_sequential_ids() {
        let registry = setup_registry();
        let ids: Vec<&str> = registry.list_people().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(registry.list_people()[0].first_name, "Ann");
    }

    #[test]
    fn test_person_and_car_ids_are_independent() {
        let mut registry = setup_registry();
        let car = registry.add_car(car_for("2", "Honda", "Civic")).unwrap();
        assert_eq!(car.id, "1");
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut registry = setup_registry();
        registry.delete_person("2").unwrap();
        let person = registry
            .add_person("Cy".to_string(), "Dee".to_string())
            .unwrap();
        assert_eq!(person.id, "3");

        let car = registry.add_car(car_for("1", "Kia", "Rio")).unwrap();
        registry.delete_car(&car.id).unwrap();
        let car = registry.add_car(car_for("1", "Kia", "Soul")).unwrap();
        assert_eq!(car.id, "2");
    }

    #[test]
    fn test_person_with_cars_filters_by_owner() {
        let mut registry = setup_registry();
        registry.add_car(car_for("1", "Honda", "Civic")).unwrap();
        registry.add_car(car_for("2", "Ford", "Focus")).unwrap();
        registry.add_car(car_for("1", "Honda", "Jazz")).unwrap();

        let found = registry.person_with_cars("1").unwrap();
        assert_eq!(found.person.first_name, "Ann");
        let models: Vec<&str> = found.cars.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Civic", "Jazz"]);

        assert!(registry.person_with_cars("99").is_none());
    }

    #[test]
    fn test_delete_person_cascades_to_cars() {
        let mut registry = setup_registry();
        registry.add_car(car_for("1", "Honda", "Civic")).unwrap();
        registry.add_car(car_for("2", "Ford", "Focus")).unwrap();

        let removed = registry.delete_person("1").unwrap();
        assert_eq!(removed.first_name, "Ann");
        assert!(registry.list_cars().iter().all(|c| c.person_id != "1"));
        assert_eq!(registry.list_cars().len(), 1);
        assert!(registry.delete_person("1").is_none());
    }

    #[test]
    fn test_update_person_partial() {
        let mut registry = setup_registry();
        let updated = registry
            .update_person(
                "1",
                PersonPatch {
                    first_name: None,
                    last_name: Some("Park".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.first_name, "Ann");
        assert_eq!(updated.last_name, "Park");

        let updated = registry
            .update_person(
                "1",
                PersonPatch {
                    first_name: Some(String::new()),
                    last_name: None,
                },
            )
            .unwrap();
        assert_eq!(updated.first_name, "Ann");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut registry = setup_registry();
        let err = registry
            .update_person("42", PersonPatch::default())
            .unwrap_err();
        assert!(matches!(err, RegistryError::PersonNotFound(ref id) if id == "42"));

        let err = registry.update_car("42", CarPatch::default()).unwrap_err();
        assert!(matches!(err, RegistryError::CarNotFound(ref id) if id == "42"));
    }

    #[test]
    fn test_update_car_partial() {
        let mut registry = setup_registry();
        let car = registry.add_car(car_for("1", "Honda", "Civic")).unwrap();
        let updated = registry
            .update_car(
                &car.id,
                CarPatch {
                    price: Some(0.0),
                    person_id: Some("2".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 0.0);
        assert_eq!(updated.person_id, "2");
        assert_eq!(updated.make, "Honda");
        assert_eq!(registry.cars_for_person("2").len(), 1);
    }

    #[test]
    fn test_orphan_car_permitted_by_default() {
        let mut registry = Registry::new();
        let car = registry.add_car(car_for("7", "Honda", "Civic")).unwrap();
        assert_eq!(car.person_id, "7");
    }

    #[test]
    fn test_strict_rejects_orphans_and_bad_input() {
        let mut registry = Registry::strict();
        let err = registry.add_car(car_for("7", "Honda", "Civic")).unwrap_err();
        assert!(err.to_string().contains("Owner 7 does not exist"));

        assert!(registry.add_person(String::new(), "Lee".to_string()).is_err());
        let ann = registry
            .add_person("Ann".to_string(), "Lee".to_string())
            .unwrap();
        let car = registry.add_car(car_for(&ann.id, "Honda", "Civic")).unwrap();

        let err = registry
            .update_car(
                &car.id,
                CarPatch {
                    person_id: Some("99".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.code(), "BAD_USER_INPUT");
        assert_eq!(registry.get_car(&car.id).unwrap().person_id, ann.id);
    }

    #[test]
    fn test_strict_update_person_rejects_invalid_names() {
        let mut registry = Registry::strict();
        registry
            .add_person("Ann".to_string(), "Lee".to_string())
            .unwrap();

        let err = registry
            .update_person(
                "1",
                PersonPatch {
                    first_name: Some("   ".to_string()),
                    last_name: Some("x".repeat(500)),
                },
            )
            .unwrap_err();
        assert_eq!(err.code(), "BAD_USER_INPUT");

        let person = registry.get_person("1").unwrap();
        assert_eq!(person.first_name, "Ann");
        assert_eq!(person.last_name, "Lee");

        // Empty values still mean "leave unchanged"
        let updated = registry
            .update_person(
                "1",
                PersonPatch {
                    first_name: Some(String::new()),
                    last_name: Some("Park".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.last_name, "Park");
    }

    #[test]
    fn test_delete_car() {
        let mut registry = setup_registry();
        let car = registry.add_car(car_for("1", "Honda", "Civic")).unwrap();
        assert_eq!(registry.delete_car(&car.id), Some(car));
        assert!(registry.delete_car("1").is_none());
        assert_eq!(registry.list_people().len(), 2);
    }

    #[test]
    fn test_delete_all() {
        let mut registry = setup_registry();
        registry.add_car(car_for("1", "Honda", "Civic")).unwrap();

        assert!(registry.delete_all_cars());
        assert!(registry.list_cars().is_empty());
        assert_eq!(registry.list_people().len(), 2);

        registry.add_car(car_for("2", "Ford", "Focus")).unwrap();
        assert!(registry.delete_all_people());
        assert!(registry.list_people().is_empty());
        assert!(registry.list_cars().is_empty());
    }
}
