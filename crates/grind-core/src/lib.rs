//! Core types and logic for the grind practice tracker.
//!
//! This crate owns the document model (problem lists, study plans, upsolve
//! records), the mutation operations on it, and the pure view projections
//! derived from it. It is deliberately free of I/O and rendering
//! dependencies; persistence backends implement [`store::DocumentStore`].

pub mod calendar;
pub mod document;
pub mod error;
pub mod mutate;
pub mod record;
pub mod schema;
pub mod store;
pub mod views;

pub use error::{Error, Result};
