use crate::lookup::PLACEHOLDER_MODEL;
use crate::model::Make;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::{Value, json};

/// Parse `--variables` into a JSON object.
pub fn parse_variables(variables: Option<String>) -> Result<Value> {
    let Some(raw) = variables else {
        return Ok(json!({}));
    };
    let value: Value = serde_json::from_str(&raw).context("Variables must be valid JSON")?;
    if !value.is_object() {
        bail!("Variables must be a JSON object");
    }
    Ok(value)
}

/// POST a GraphQL request to `endpoint` and return the decoded response body.
pub fn execute_remote(endpoint: &str, query: &str, variables: Value) -> Result<Value> {
    crate::install_crypto_provider();
    let body = json!({ "query": query, "variables": variables });

    tokio::runtime::Runtime::new()?.block_on(async {
        let response = reqwest::Client::new()
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach GraphQL server at {}", endpoint))?;
        let status = response.status();
        let value: Value = response
            .json()
            .await
            .with_context(|| format!("Server answered {} with a non-JSON body", status))?;
        Ok::<_, anyhow::Error>(value)
    })
}

/// Print a GraphQL response; fail when it carries errors.
pub fn print_response(response: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    match response.get("errors").and_then(Value::as_array) {
        Some(errors) if !errors.is_empty() => bail!("Request returned {} error(s)", errors.len()),
        _ => Ok(()),
    }
}

pub fn print_make_list(makes: &[Make]) {
    if makes.is_empty() {
        println!("No makes found");
        return;
    }
    for make in makes {
        println!("{:>6}  {}", make.id.to_string().cyan(), make.name);
    }
}

pub fn print_model_list(make: &str, models: &[String]) {
    println!("{} {}", "Models for".green(), make.bold());
    for model in models {
        if model == PLACEHOLDER_MODEL {
            println!("  {}", model.dimmed());
        } else {
            println!("  {}", model);
        }
    }
}
