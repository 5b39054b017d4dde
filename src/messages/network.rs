//! Network messages - communication between App and Network layers

use crate::models::{Car, CarList, CarQuery, NewCar, Operation};
use crate::network::ApiError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// List cars, optionally filtered
    FetchCars { id: u64, query: CarQuery },
    /// Create a car from a submitted draft
    CreateCar { id: u64, car: NewCar },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug)]
pub enum NetworkResponse {
    CarsLoaded {
        id: u64,
        query: CarQuery,
        list: CarList,
    },
    CarCreated {
        id: u64,
        car: Car,
    },
    /// Any failure: transport, non-2xx status or undecodable body
    Failed {
        id: u64,
        operation: Operation,
        error: ApiError,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::CarsLoaded { id, .. } => *id,
            NetworkResponse::CarCreated { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
