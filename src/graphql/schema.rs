use std::path::Path;
use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, ID, Object, Schema};
use tracing::debug;

use crate::catalog::MakeCatalog;
use crate::config::LedgerConfig;
use crate::error::Result;
use crate::lookup::{self, ModelLookup, VpicClient};
use crate::model::{CarPatch, NewCar, PersonPatch};
use crate::storage::{Registry, SharedRegistry};

use super::types::*;

pub type LedgerSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Everything the resolvers need, injected into the schema once.
pub struct AppState {
    pub registry: SharedRegistry,
    pub catalog: MakeCatalog,
    pub lookup: Arc<dyn ModelLookup>,
}

impl AppState {
    pub fn new(registry: Registry, catalog: MakeCatalog, lookup: Arc<dyn ModelLookup>) -> Self {
        Self {
            registry: registry.into_shared(),
            catalog,
            lookup,
        }
    }

    /// Empty registry, make catalog from disk and a live vPIC client.
    pub fn from_config(config: &LedgerConfig, root: &Path) -> Result<Self> {
        let registry = Registry::with_strict(config.validation.strict);
        let catalog = MakeCatalog::load(&config.makes_path(root))?;
        let lookup = VpicClient::new(&config.lookup)?;
        Ok(Self::new(registry, catalog, Arc::new(lookup)))
    }
}

pub fn build_schema(state: AppState) -> LedgerSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(Arc::new(state))
        .finish()
}

pub(crate) fn shared_state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<AppState>> {
    ctx.data::<Arc<AppState>>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All people, in insertion order
    async fn people(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Option<Person>>>> {
        let registry = shared_state(ctx)?.registry.read().await;
        Ok(Some(
            registry
                .list_people()
                .iter()
                .cloned()
                .map(|p| Some(Person::from(p)))
                .collect(),
        ))
    }

    /// All cars, in insertion order
    async fn cars(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Vec<Option<Car>>>> {
        let registry = shared_state(ctx)?.registry.read().await;
        Ok(Some(
            registry
                .list_cars()
                .iter()
                .cloned()
                .map(|c| Some(Car::from(c)))
                .collect(),
        ))
    }

    /// A person together with their cars, or null if the id is unknown
    #[graphql(name = "personWithcars")]
    async fn person_with_cars(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<Person>> {
        let registry = shared_state(ctx)?.registry.read().await;
        Ok(registry.person_with_cars(&id).map(Person::from))
    }

    /// Vehicle makes from the bundled catalog, optionally filtered by name
    async fn car_makes(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
    ) -> async_graphql::Result<Option<Vec<Option<Make>>>> {
        let catalog = &shared_state(ctx)?.catalog;
        let makes = match search {
            Some(query) => catalog.search(&query),
            None => catalog.all().to_vec(),
        };
        Ok(Some(makes.into_iter().map(|m| Some(Make::from(m))).collect()))
    }

    /// Model names for a make from vPIC, or a placeholder when unavailable
    async fn car_models(&self, ctx: &Context<'_>, make: String) -> async_graphql::Result<Vec<String>> {
        let state = shared_state(ctx)?;
        Ok(lookup::models_or_placeholder(state.lookup.as_ref(), &make).await)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new person
    async fn add_person(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
    ) -> async_graphql::Result<Option<Person>> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        let person = registry
            .add_person(first_name, last_name)
            .map_err(|e| e.extend())?;
        Ok(Some(person.into()))
    }

    /// Overwrite the provided, non-empty fields of a person
    async fn update_person(
        &self,
        ctx: &Context<'_>,
        id: ID,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> async_graphql::Result<Option<Person>> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        let patch = PersonPatch {
            first_name,
            last_name,
        };
        let person = registry
            .update_person(&id, patch)
            .map_err(|e| e.extend())?;
        Ok(Some(person.into()))
    }

    /// Delete a person and all of their cars
    async fn delete_person(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<Person>> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        let removed = registry.delete_person(&id);
        if removed.is_none() {
            debug!(id = %id.as_str(), "deletePerson: no such person");
        }
        Ok(removed.map(Person::from))
    }

    /// Create a new car
    async fn add_car(
        &self,
        ctx: &Context<'_>,
        year: i32,
        make: String,
        model: String,
        price: f64,
        person_id: ID,
    ) -> async_graphql::Result<Option<Car>> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        let car = registry
            .add_car(NewCar {
                year,
                make,
                model,
                price,
                person_id: person_id.0,
            })
            .map_err(|e| e.extend())?;
        Ok(Some(car.into()))
    }

    /// Overwrite the provided fields of a car
    #[allow(clippy::too_many_arguments)]
    async fn update_car(
        &self,
        ctx: &Context<'_>,
        id: ID,
        year: Option<i32>,
        make: Option<String>,
        model: Option<String>,
        price: Option<f64>,
        person_id: Option<ID>,
    ) -> async_graphql::Result<Option<Car>> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        let patch = CarPatch {
            year,
            make,
            model,
            price,
            person_id: person_id.map(|id| id.0),
        };
        let car = registry.update_car(&id, patch).map_err(|e| e.extend())?;
        Ok(Some(car.into()))
    }

    /// Delete a single car
    async fn delete_car(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Car>> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        Ok(registry.delete_car(&id).map(Car::from))
    }

    /// Delete every person and, with them, every car
    async fn delete_all_people(&self, ctx: &Context<'_>) -> async_graphql::Result<bool> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        Ok(registry.delete_all_people())
    }

    /// Delete every car, keeping people
    async fn delete_all_cars(&self, ctx: &Context<'_>) -> async_graphql::Result<bool> {
        let mut registry = shared_state(ctx)?.registry.write().await;
        Ok(registry.delete_all_cars())
    }
}
