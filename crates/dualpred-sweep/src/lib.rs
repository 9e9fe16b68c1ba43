pub mod orchestrator;
pub use orchestrator::{SweepOrchestrator, SweepPoint};
