//! JSON API endpoint handlers for packwatch.

pub mod stats;
