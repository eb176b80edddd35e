pub mod engine;
pub mod store;

pub use engine::{CompletionReceipt, FlowFitEngine};
pub use store::{MemoryStandingStore, StandingStore};
