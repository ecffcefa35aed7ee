pub mod checker;
pub mod dataset;
pub mod error;
pub mod record;

// Re-exports for convenience
pub use checker::{
    Baseline, CheckReport, Direction, OrderChecker, OrderViolation, OrderViolations, check_order,
};
pub use error::DatasetError;
pub use record::{MessagePage, MessageRecord};
