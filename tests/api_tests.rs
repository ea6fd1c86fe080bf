use assert_cmd::Command;
use carledger::catalog::MakeCatalog;
use carledger::config::ServerSettings;
use carledger::graphql::{AppState, build_schema, router, serve};
use carledger::lookup::StaticModelLookup;
use carledger::storage::Registry;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

/// Start a server on an ephemeral port and return its GraphQL endpoint.
async fn spawn_server(strict: bool) -> String {
    let state = AppState::new(
        Registry::with_strict(strict),
        MakeCatalog::bundled().unwrap(),
        Arc::new(StaticModelLookup::new().with_models("honda", &["Civic", "Accord"])),
    );
    let app = router(build_schema(state), &ServerSettings::default()).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = serve(listener, app).await;
    });
    format!("http://{}/graphql", addr)
}

async fn post(endpoint: &str, query: &str, variables: Value) -> Value {
    carledger::install_crypto_provider();
    reqwest::Client::new()
        .post(endpoint)
        .json(&json!({ "query": query, "variables": variables }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

// =============================================================================
// End-to-end over HTTP
// =============================================================================

#[tokio::test]
async fn test_person_car_lifecycle() {
    let endpoint = spawn_server(false).await;

    let res = post(
        &endpoint,
        r#"mutation { addPerson(firstName: "Ann", lastName: "Lee") { id firstName lastName } }"#,
        json!({}),
    )
    .await;
    assert_eq!(
        res["data"]["addPerson"],
        json!({"id": "1", "firstName": "Ann", "lastName": "Lee"})
    );

    let res = post(
        &endpoint,
        "mutation Add($year: Int!, $make: String!, $model: String!, $price: Float!, $personId: ID!) {
            addCar(year: $year, make: $make, model: $model, price: $price, personId: $personId) { id year personId }
        }",
        json!({"year": 2020, "make": "Honda", "model": "Civic", "price": 15000.0, "personId": "1"}),
    )
    .await;
    assert_eq!(
        res["data"]["addCar"],
        json!({"id": "1", "year": 2020, "personId": "1"})
    );

    let res = post(
        &endpoint,
        r#"{ personWithcars(id: "1") { firstName cars { make model price } } }"#,
        json!({}),
    )
    .await;
    assert_eq!(
        res["data"]["personWithcars"]["cars"],
        json!([{"make": "Honda", "model": "Civic", "price": 15000.0}])
    );

    let res = post(&endpoint, r#"mutation { deletePerson(id: "1") { id } }"#, json!({})).await;
    assert_eq!(res["data"]["deletePerson"]["id"], "1");

    let res = post(&endpoint, "{ people { id } cars { id } }", json!({})).await;
    assert_eq!(res["data"], json!({"people": [], "cars": []}));

    // Counters keep going after deletions
    let res = post(
        &endpoint,
        r#"mutation { addPerson(firstName: "Bob", lastName: "Ray") { id } }"#,
        json!({}),
    )
    .await;
    assert_eq!(res["data"]["addPerson"]["id"], "2");
}

#[tokio::test]
async fn test_not_found_update_is_an_error_payload() {
    let endpoint = spawn_server(false).await;

    let res = post(
        &endpoint,
        r#"mutation { updateCar(id: "12", make: "Ford") { id } }"#,
        json!({}),
    )
    .await;
    assert_eq!(res["data"]["updateCar"], Value::Null);
    assert_eq!(res["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_required_field_is_a_validation_error() {
    let endpoint = spawn_server(false).await;

    let res = post(
        &endpoint,
        r#"mutation { addCar(year: 2020, make: "Honda", price: 1.0, personId: "1") { id } }"#,
        json!({}),
    )
    .await;
    assert!(res["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_strict_server_rejects_orphan_car() {
    let endpoint = spawn_server(true).await;

    let res = post(
        &endpoint,
        r#"mutation { addCar(year: 2020, make: "Honda", model: "Civic", price: 1.0, personId: "404") { id } }"#,
        json!({}),
    )
    .await;
    assert_eq!(res["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");
}

#[tokio::test]
async fn test_catalog_queries() {
    let endpoint = spawn_server(false).await;

    let res = post(&endpoint, r#"{ carMakes(search: "land") { Make_Name } }"#, json!({})).await;
    assert_eq!(res["data"]["carMakes"], json!([{"Make_Name": "LAND ROVER"}]));

    let res = post(&endpoint, r#"{ carModels(make: "Honda") }"#, json!({})).await;
    assert_eq!(res["data"]["carModels"], json!(["Civic", "Accord"]));
}

#[tokio::test]
async fn test_health_and_graphiql() {
    let endpoint = spawn_server(false).await;
    carledger::install_crypto_provider();
    let client = reqwest::Client::new();

    let health: Value = client
        .get(endpoint.replace("/graphql", "/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "ok"}));

    let page = client.get(&endpoint).send().await.unwrap().text().await.unwrap();
    assert!(page.to_lowercase().contains("graphiql"));
}

// =============================================================================
// CLI against a live server
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cli_mutate_and_query_against_server() {
    let endpoint = spawn_server(false).await;

    let mutate_endpoint = endpoint.clone();
    tokio::task::spawn_blocking(move || {
        Command::new(assert_cmd::cargo::cargo_bin!("carledger"))
            .args([
                "mutate",
                r#"addPerson(firstName: "Ann", lastName: "Lee") { id }"#,
                "--endpoint",
                &mutate_endpoint,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"id\": \"1\""));
    })
    .await
    .unwrap();

    tokio::task::spawn_blocking(move || {
        Command::new(assert_cmd::cargo::cargo_bin!("carledger"))
            .args([
                "query",
                "query($id: ID!) { personWithcars(id: $id) { lastName } }",
                "--variables",
                r#"{"id":"1"}"#,
                "--endpoint",
                &endpoint,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Lee"));
    })
    .await
    .unwrap();
}
