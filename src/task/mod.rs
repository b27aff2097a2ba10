//! Task lifecycle and task queries.
//!
//! Tasks are work items with a completion flag, a step value and an optional
//! category. Besides create, update and removal, this module composes
//! filter, sort and page criteria into storage queries. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
