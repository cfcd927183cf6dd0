//! Core renderer trait for diagram output
//!
//! This trait defines the interface for rendering diagram data into
//! output formats. A schema model has several: canonical notation,
//! dialect-specific DDL and a plain-text summary.

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// # Example
/// ```
/// use erdwright::core::Renderer;
/// use erdwright::plugins::er::{NotationRenderer, SchemaModel};
///
/// let model = SchemaModel::new();
/// let renderer = NotationRenderer::new();
/// let output = renderer.render(&model).unwrap();
/// assert_eq!(output, "erDiagram\n");
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
