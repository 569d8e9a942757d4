pub mod routes;
pub mod types;

pub use types::{
    AreaAcceptedResponse, CitiesResponse, DistanceResponse, DistanceUnit,
    PendingResponse,
};
