//! Route paths served by the Geoscope HTTP API.

use crate::jobs::JobHandle;

pub const CITIES_BY_TAG: &str = "/cities-by-tag";
pub const DISTANCE: &str = "/distance";
pub const AREA: &str = "/area";
pub const AREA_RESULT: &str = "/area-result/{handle}";
pub const ALL_CITIES: &str = "/all-cities";

/// Concrete path for polling one job, e.g. `/area-result/2152f96f-...`.
pub fn area_result_path(handle: JobHandle) -> String {
    AREA_RESULT.replace("{handle}", &handle.to_string())
}
