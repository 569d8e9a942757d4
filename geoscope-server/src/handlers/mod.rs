pub mod area;
pub mod cities;
pub mod dataset;
pub mod distance;
pub mod params;

pub use area::{area_handler, area_result_handler};
pub use cities::cities_by_tag_handler;
pub use dataset::all_cities_handler;
pub use distance::distance_handler;
