//! Python bindings (enabled with the `pyo3` feature)
//!
//! The boundary is JSON in, JSON out: instruments arrive as a JSON array and
//! results leave as JSON documents, so Python callers can hand them straight
//! to an API layer.

pub mod planner;
