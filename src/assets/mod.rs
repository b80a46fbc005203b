pub mod catalog;
pub mod params;
pub mod path;
