//! AWS Lambda handler for the simulation API
//!
//! Served through a Lambda Function URL. The request path selects the
//! operation (`/amortize`, `/life-insurance`, `/home-insurance`, `/compare`,
//! `/batch`) and the JSON body carries its parameters.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{error, info, warn};
use mortgage_sim::api::Api;
use mortgage_sim::{SimulationConfig, SimulationError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Function URL response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionUrlResponse {
    status_code: u16,
    headers: BTreeMap<&'static str, &'static str>,
    body: String,
    is_base64_encoded: bool,
}

fn cors_headers() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ])
}

fn response(status_code: u16, body: String) -> FunctionUrlResponse {
    FunctionUrlResponse {
        status_code,
        headers: cors_headers(),
        body,
        is_base64_encoded: false,
    }
}

fn error_response(status_code: u16, message: &str) -> FunctionUrlResponse {
    response(status_code, serde_json::json!({ "error": message }).to_string())
}

fn status_for(err: &SimulationError) -> u16 {
    match err {
        SimulationError::UnknownOperation(_) => 404,
        err if err.is_client_error() => 400,
        _ => 500,
    }
}

async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<FunctionUrlResponse, Error> {
    let request = event.payload;
    let method = request.request_context.http.method.as_deref().unwrap_or("POST");

    // CORS preflight
    if method.eq_ignore_ascii_case("OPTIONS") {
        return Ok(response(200, String::new()));
    }
    if !method.eq_ignore_ascii_case("POST") {
        return Ok(error_response(405, "Only POST is supported"));
    }
    if request.is_base64_encoded {
        return Ok(error_response(400, "Body must be plain JSON"));
    }

    let path = request.raw_path.as_deref().unwrap_or("/");
    let body = request.body.as_deref().unwrap_or("{}");

    let start = Instant::now();
    let api = Api::new(SimulationConfig::default());

    match api.dispatch(path, body) {
        Ok(value) => {
            info!("{} completed in {:?}", path, start.elapsed());
            Ok(response(200, serde_json::to_string(&value)?))
        }
        Err(err) => {
            let status = status_for(&err);
            if status >= 500 {
                error!("{} failed: {}", path, err);
            } else {
                warn!("{} rejected: {}", path, err);
            }
            Ok(error_response(status, &err.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
