pub mod prompt;
pub mod scoring;
pub mod strategy;

pub use crate::domain::model::{EmployeeRecord, Report, ScoredRecord};
pub use crate::domain::ports::{ConfigProvider, TextGenerator};
pub use crate::utils::error::Result;
