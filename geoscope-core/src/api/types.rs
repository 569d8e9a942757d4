use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// `{ "cities": [...] }`, shared by tag filtering and completed area jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitiesResponse<'a> {
    pub cities: Cow<'a, [Address]>,
}

impl<'a> CitiesResponse<'a> {
    pub fn borrowed(cities: &'a [Address]) -> Self {
        Self {
            cities: Cow::Borrowed(cities),
        }
    }

    pub fn owned(cities: Vec<Address>) -> Self {
        Self {
            cities: Cow::Owned(cities),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "km")]
    Kilometers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResponse {
    pub from: Address,
    pub to: Address,
    /// Kilometers rounded to three decimals.
    pub distance: f64,
    pub unit: DistanceUnit,
}

/// Body of the `202 Accepted` answer to an area search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAcceptedResponse {
    pub results_url: String,
}

/// Empty object returned while a job is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingResponse {}
