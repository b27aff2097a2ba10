//! Category catalogue and spreadsheet import.
//!
//! Categories group tasks. Besides creation and lookup, this module owns the
//! bulk import that reads categories from an uploaded spreadsheet and stores
//! only names not seen before. The module follows hexagonal architecture:
//!
//! - Domain types and pure import steps in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
