//! NLU integration - Intent classification of incoming text

pub mod traits;
pub mod providers;

pub use traits::{Classifier, Classification, EntityValue, NluError, NluResult};
pub use providers::WitProvider;
