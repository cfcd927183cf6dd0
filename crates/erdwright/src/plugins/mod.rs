//! Plugin implementations for diagram types
//!
//! Each plugin implements the core traits for its diagram type. The ER
//! plugin covers `erDiagram` notation and the schema model behind it.

pub mod er;

pub use er::*;
