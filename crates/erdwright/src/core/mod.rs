//! Core abstractions for diagram processing
//!
//! This module defines the traits every diagram plugin implements
//! (database, parser, renderer, detector) together with the shared
//! error type, logging setup and parser combinators.

pub mod chumsky_utils;
mod database;
mod detector;
mod error;
pub mod logging;
mod parser;
mod renderer;

pub use database::*;
pub use detector::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
