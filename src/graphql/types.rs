use crate::model::{Car as ModelCar, Make as ModelMake, Person as ModelPerson};
use crate::storage::PersonWithCars;
use async_graphql::{ComplexObject, Context, ID, SimpleObject};

use super::schema::shared_state;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Person {
    pub id: ID,
    pub first_name: String,
    pub last_name: String,

    /// Cars resolved together with the person, when already known.
    #[graphql(skip)]
    pub prefetched_cars: Option<Vec<Car>>,
}

#[ComplexObject]
impl Person {
    /// Cars owned by this person, in insertion order
    async fn cars(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Option<Car>>>> {
        let cars = match &self.prefetched_cars {
            Some(cars) => cars.clone(),
            None => {
                let state = shared_state(ctx)?;
                let registry = state.registry.read().await;
                registry
                    .cars_for_person(&self.id)
                    .into_iter()
                    .map(Car::from)
                    .collect()
            }
        };
        Ok(Some(cars.into_iter().map(Some).collect()))
    }
}

impl From<ModelPerson> for Person {
    fn from(p: ModelPerson) -> Self {
        Self {
            id: ID(p.id),
            first_name: p.first_name,
            last_name: p.last_name,
            prefetched_cars: None,
        }
    }
}

impl From<PersonWithCars> for Person {
    fn from(found: PersonWithCars) -> Self {
        let cars = found.cars.into_iter().map(Car::from).collect();
        Self {
            prefetched_cars: Some(cars),
            ..Person::from(found.person)
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Car {
    pub id: ID,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub price: f64,
    pub person_id: ID,
}

impl From<ModelCar> for Car {
    fn from(c: ModelCar) -> Self {
        Self {
            id: ID(c.id),
            year: c.year,
            make: c.make,
            model: c.model,
            price: c.price,
            person_id: ID(c.person_id),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Make {
    #[graphql(name = "Make_ID")]
    pub id: i32,
    #[graphql(name = "Make_Name")]
    pub name: String,
}

impl From<ModelMake> for Make {
    fn from(m: ModelMake) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
