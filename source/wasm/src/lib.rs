pub mod firebase;
pub mod js;
pub mod params;
pub mod surface;
