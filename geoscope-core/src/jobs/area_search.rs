use rayon::prelude::*;

use crate::{
    address::Address, distance::haversine_km, error::SearchError,
    store::AddressStore,
};

/// Parameters of one radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaQuery {
    pub origin: String,
    pub radius_km: f64,
}

impl AreaQuery {
    pub fn new(origin: impl Into<String>, radius_km: f64) -> Self {
        Self {
            origin: origin.into(),
            radius_km,
        }
    }
}

/// Every record within `radius_km` of the origin, boundary included, origin
/// excluded, in store order.
///
/// CPU bound over the whole store; call it from a blocking context.
pub fn area_search(
    store: &AddressStore,
    query: &AreaQuery,
) -> Result<Vec<Address>, SearchError> {
    if !query.radius_km.is_finite() || query.radius_km < 0.0 {
        return Err(SearchError::InvalidRadius(query.radius_km));
    }

    let origin = store
        .get(&query.origin)
        .ok_or_else(|| SearchError::OriginNotFound(query.origin.clone()))?;
    let origin_point = origin.coordinates();
    let radius_km = query.radius_km;

    let candidates = store
        .as_slice()
        .par_iter()
        .filter(|candidate| candidate.guid != origin.guid)
        .map(|candidate| {
            let km = haversine_km(origin_point, candidate.coordinates());
            if !km.is_finite() {
                return Err(SearchError::InvalidCoordinates {
                    guid: candidate.guid.clone(),
                });
            }
            Ok((km <= radius_km).then(|| candidate.clone()))
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    Ok(candidates.into_iter().flatten().collect())
}
