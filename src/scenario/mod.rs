//! Scenario execution against the in-memory model

pub mod runner;

pub use runner::{PlayerSnapshot, RunSummary, ScenarioRunner, StepOutcome};
