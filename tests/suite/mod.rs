//! Integration test modules

mod config;
mod escalation;
mod flow;
