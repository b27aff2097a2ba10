//! Taskdeck: task and category tracking backend.
//!
//! This crate provides the core of a task tracker: validated search criteria
//! composed into paged task queries, and a spreadsheet import that adds only
//! net-new categories.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and document decoding
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   spreadsheet)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle and search
//! - [`category`]: Category catalogue and bulk import
//! - [`config`]: Environment-driven limits and database settings

pub mod category;
pub mod config;
pub mod task;
