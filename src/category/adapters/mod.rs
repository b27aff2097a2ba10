//! Adapter implementations for category ports.

pub mod memory;
pub mod postgres;
pub mod spreadsheet;
