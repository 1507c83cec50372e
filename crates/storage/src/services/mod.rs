pub mod advice;
pub mod calculation;
pub mod classification;
pub mod formulas;
pub mod report;

pub use calculation::{Calculation, calculate, persist_in_background};
pub use report::profile_report;
