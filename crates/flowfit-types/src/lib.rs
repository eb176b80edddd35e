pub mod address;
pub mod amount;
pub mod error;

pub use address::AccountAddress;
pub use amount::FftAmount;
pub use error::{FlowFitError, Result};
