#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod time;

pub use catalog::ProblemCatalog;
pub use time::Clock;
