//! Pipeline module - load, normalize, aggregate and shape chart data

pub mod aggregate;
pub mod attrition;
pub mod charts;
pub mod config;
pub mod correlation;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod missing;
pub mod session;
pub mod values;

pub use aggregate::*;
pub use attrition::*;
pub use charts::*;
pub use config::*;
pub use correlation::*;
pub use dashboard::*;
pub use error::*;
pub use loader::*;
pub use missing::*;
pub use session::*;
pub use values::*;
