//! Core domain types for Valentine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the engine owns
//! the state, the TUI reads it.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod effect;
mod escalation;
mod options;
mod snapshot;
mod stage;
pub mod view;

pub use effect::{Effect, Intensity};
pub use escalation::{
    ConfirmOutcome, EscalationLevel, EscalationMachine, EscalationState, RefuseOutcome,
};
pub use options::UiOptions;
pub use snapshot::Snapshot;
pub use stage::{AssetId, InvalidTransition, Operation, Stage};
