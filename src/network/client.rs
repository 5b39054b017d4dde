//! HTTP client wrapper - talks to the Car Service and maps results into responses

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use crate::messages::NetworkResponse;
use crate::models::{Car, CarList, CarQuery, CreatedCar, NewCar, Operation};
use crate::network::ApiError;

/// Thin typed client over the Car Service REST API
#[derive(Clone, Debug)]
pub struct CarClient {
    client: reqwest::Client,
    base_url: String,
}

impl CarClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        CarClient {
            client: create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET one of the list endpoints
    pub async fn list(&self, query: CarQuery) -> Result<CarList, ApiError> {
        let resp = self.client.get(self.url(&query.path())).send().await?;
        read_json(resp).await
    }

    /// POST a new car, returning the stored record
    pub async fn create(&self, car: &NewCar) -> Result<Car, ApiError> {
        let resp = self.client.post(self.url("/cars")).json(car).send().await?;
        let created: CreatedCar = read_json(resp).await?;
        Ok(created.into_car())
    }
}

/// Check the status, then decode the body. The body of a failed response is
/// never inspected.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Run a list query and wrap the outcome for the App layer
pub async fn execute_fetch(client: &CarClient, request_id: u64, query: CarQuery) -> NetworkResponse {
    let start = Instant::now();
    let result = client.list(query).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(list) => {
            tracing::info!(id = request_id, ?query, cars = list.cars.len(), time_ms = elapsed, "Cars loaded");
            NetworkResponse::CarsLoaded {
                id: request_id,
                query,
                list,
            }
        }
        Err(error) => {
            tracing::warn!(id = request_id, ?query, time_ms = elapsed, %error, "Fetch failed");
            NetworkResponse::Failed {
                id: request_id,
                operation: query.operation(),
                error,
            }
        }
    }
}

/// Create a car and wrap the outcome for the App layer
pub async fn execute_create(client: &CarClient, request_id: u64, car: NewCar) -> NetworkResponse {
    let start = Instant::now();
    let result = client.create(&car).await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(car) => {
            tracing::info!(id = request_id, car_id = car.id, time_ms = elapsed, "Car created");
            NetworkResponse::CarCreated { id: request_id, car }
        }
        Err(error) => {
            tracing::warn!(id = request_id, time_ms = elapsed, %error, "Create failed");
            NetworkResponse::Failed {
                id: request_id,
                operation: Operation::Create,
                error,
            }
        }
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
