//! Core database trait for diagram data storage
//!
//! For ER diagrams the nodes are tables and the edges are relationships.
//! Edges refer to nodes by display name, so besides lookup by id the
//! trait exposes lookup by name for resolving those weak references.

use anyhow::Result;

/// Core trait for diagram databases
///
/// The associated types let each diagram type define its own node and
/// edge structures.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by its stable id
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Resolve a node by display name (first match in insertion order)
    fn resolve_node(&self, name: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// True when there are neither nodes nor edges
    fn is_empty(&self) -> bool {
        self.node_count() == 0 && self.edge_count() == 0
    }
}
