//! Data models for the Tech Lab monitor

pub mod equipment;
pub mod loan;
pub mod search;
pub mod specification;
pub mod status;
pub mod user;

// Re-export commonly used types
pub use equipment::Equipment;
pub use loan::{LoanRequest, LoanResponse};
pub use search::{FilterCriteria, SearchPanel, SearchQuery};
pub use specification::{SpecRow, Specification, SpecificationKind};
pub use status::{StatusDescriptor, StatusTaxonomy};
pub use user::{LoginCredentials, User};
