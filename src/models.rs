use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    MSG_CREATE_FAILED, MSG_FETCH_FAILED, MSG_FETCH_PRICE_FAILED, MSG_FETCH_YEAR_FAILED,
};

/// A car record as stored by the Car Service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: i64,
}

/// Envelope returned by every list endpoint
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CarList {
    pub cars: Vec<Car>,
    /// Only the filtered endpoints report it
    #[serde(default)]
    pub count: Option<usize>,
}

/// Creation payload, `year` and `price` go out as JSON integers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: i64,
}

/// Body of a successful create.
///
/// Some deployments answer with the bare record, others wrap it as
/// `{ "message": ..., "car": {...} }`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedCar {
    Envelope {
        car: Car,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Car),
}

impl CreatedCar {
    pub fn into_car(self) -> Car {
        match self {
            CreatedCar::Envelope { car, .. } => car,
            CreatedCar::Bare(car) => car,
        }
    }
}

/// Which list endpoint to hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarQuery {
    All,
    ByYear(i64),
    ByMaxPrice(i64),
}

impl CarQuery {
    /// Path relative to the service base URL
    pub fn path(&self) -> String {
        match self {
            CarQuery::All => String::from("/cars"),
            CarQuery::ByYear(year) => format!("/cars/year/{}", year),
            CarQuery::ByMaxPrice(price) => format!("/cars/price/{}", price),
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            CarQuery::All => Operation::FetchAll,
            CarQuery::ByYear(_) => Operation::FetchByYear,
            CarQuery::ByMaxPrice(_) => Operation::FetchByPrice,
        }
    }
}

/// Every call the client makes, used to pick the failure banner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    FetchByYear,
    FetchByPrice,
    Create,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchAll => MSG_FETCH_FAILED,
            Operation::FetchByYear => MSG_FETCH_YEAR_FAILED,
            Operation::FetchByPrice => MSG_FETCH_PRICE_FAILED,
            Operation::Create => MSG_CREATE_FAILED,
        }
    }
}

/// One input of the creation form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Brand,
    Model,
    Year,
    Color,
    Price,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Brand,
        DraftField::Model,
        DraftField::Year,
        DraftField::Color,
        DraftField::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Brand => "Brand",
            DraftField::Model => "Model",
            DraftField::Year => "Year",
            DraftField::Color => "Color",
            DraftField::Price => "Price",
        }
    }

    /// Numeric inputs only take digits while typing
    pub fn is_numeric(&self) -> bool {
        matches!(self, DraftField::Year | DraftField::Price)
    }
}

/// Why a draft could not become a creation payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{} is required", .0.label())]
    Missing(DraftField),
    #[error("{} must be a whole number", .0.label())]
    NotANumber(DraftField),
    #[error("{} is out of range", .0.label())]
    OutOfRange(DraftField),
}

/// In-progress form entry. Numbers stay as text until submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarDraft {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub price: String,
}

impl CarDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Brand => &self.brand,
            DraftField::Model => &self.model,
            DraftField::Year => &self.year,
            DraftField::Color => &self.color,
            DraftField::Price => &self.price,
        }
    }

    pub fn get_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Brand => &mut self.brand,
            DraftField::Model => &mut self.model,
            DraftField::Year => &mut self.year,
            DraftField::Color => &mut self.color,
            DraftField::Price => &mut self.price,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Build the creation payload. Every field is required and the
    /// numeric ones must parse as integers.
    pub fn to_new_car(&self) -> Result<NewCar, DraftError> {
        for field in DraftField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(DraftError::Missing(field));
            }
        }

        let year = parse_number::<i32>(&self.year, DraftField::Year)?;
        let price = parse_number::<i64>(&self.price, DraftField::Price)?;

        Ok(NewCar {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year,
            color: self.color.clone(),
            price,
        })
    }
}

/// Digits-only text that still fails to parse has overflowed
fn parse_number<T: std::str::FromStr>(text: &str, field: DraftField) -> Result<T, DraftError> {
    let text = text.trim();
    text.parse::<T>().map_err(|_| {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            DraftError::OutOfRange(field)
        } else {
            DraftError::NotANumber(field)
        }
    })
}

/// Filter inputs as typed. Blank means "unset".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year: String,
    pub max_price: String,
}

impl FilterCriteria {
    pub fn year(&self) -> Result<Option<i64>, ParseIntError> {
        parse_optional(&self.year)
    }

    pub fn max_price(&self) -> Result<Option<i64>, ParseIntError> {
        parse_optional(&self.max_price)
    }

    pub fn clear(&mut self) {
        self.year.clear();
        self.max_price.clear();
    }
}

fn parse_optional(text: &str) -> Result<Option<i64>, ParseIntError> {
    let text = text.trim();
    if text.is_empty() {
        Ok(None)
    } else {
        text.parse().map(Some)
    }
}

/// A transient message. The token tells a fresh banner from one a stale
/// timer is trying to clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub token: u64,
}

/// One-word summary of the controller, most pressing condition first.
///
/// Used for logging and assertions; the screen draws banners and the
/// loading indicator independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiStatus {
    Idle,
    Loading,
    Error(String),
    Success(String),
}
