pub mod calculation;
pub mod common;
pub mod report;
