pub mod calculations;
pub mod calculators;
pub mod profile;
