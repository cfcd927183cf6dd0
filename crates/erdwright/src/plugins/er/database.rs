//! ER diagram database
//!
//! The schema model: tables with ordered columns, plus relationships that
//! refer to tables and columns by name. This is the structure exchanged with
//! editor front ends, so every type is plain serde data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::{Database, ErdError};

/// Number of tables per row in the default grid placement
pub const GRID_COLUMNS: usize = 4;
/// Horizontal distance between grid slots
pub const GRID_X_SPACING: f64 = 300.0;
/// Vertical distance between grid rows
pub const GRID_Y_SPACING: f64 = 200.0;
/// Vertical offset of the first grid row
pub const GRID_Y_OFFSET: f64 = 100.0;

/// Advisory 2D position of a table on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Grid slot `slot`, filled left to right in rows of [`GRID_COLUMNS`]
    pub fn grid(slot: usize) -> Self {
        Self {
            x: (slot % GRID_COLUMNS) as f64 * GRID_X_SPACING,
            y: (slot / GRID_COLUMNS) as f64 * GRID_Y_SPACING + GRID_Y_OFFSET,
        }
    }

    /// Default position of the table at `index` (0-based).
    ///
    /// Slot 0 is left free, so the first table lands in slot 1.
    pub fn for_table(index: usize) -> Self {
        Self::grid(index + 1)
    }
}

/// One of the four independent column flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnFlag {
    PrimaryKey,
    ForeignKey,
    NotNull,
    Unique,
}

impl ColumnFlag {
    pub const ALL: [ColumnFlag; 4] = [
        ColumnFlag::PrimaryKey,
        ColumnFlag::ForeignKey,
        ColumnFlag::NotNull,
        ColumnFlag::Unique,
    ];
}

impl fmt::Display for ColumnFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnFlag::PrimaryKey => write!(f, "primary-key"),
            ColumnFlag::ForeignKey => write!(f, "foreign-key"),
            ColumnFlag::NotNull => write!(f, "not-null"),
            ColumnFlag::Unique => write!(f, "unique"),
        }
    }
}

/// A table column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub name: String,
    /// Free-form type token, mapped per dialect at script generation
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default)]
    pub is_not_null: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Column {
    /// Create a column with all flags cleared and no id
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_flag(mut self, flag: ColumnFlag) -> Self {
        self.set_flag(flag, true);
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn flag(&self, flag: ColumnFlag) -> bool {
        match flag {
            ColumnFlag::PrimaryKey => self.is_primary_key,
            ColumnFlag::ForeignKey => self.is_foreign_key,
            ColumnFlag::NotNull => self.is_not_null,
            ColumnFlag::Unique => self.is_unique,
        }
    }

    pub fn set_flag(&mut self, flag: ColumnFlag, value: bool) {
        match flag {
            ColumnFlag::PrimaryKey => self.is_primary_key = value,
            ColumnFlag::ForeignKey => self.is_foreign_key = value,
            ColumnFlag::NotNull => self.is_not_null = value,
            ColumnFlag::Unique => self.is_unique = value,
        }
    }

    /// The default value, ignoring empty or whitespace-only strings
    pub fn effective_default(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// A table in the diagram
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            columns: Vec::new(),
        }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    /// First column with the given name
    pub fn column_named(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary-key columns in declaration order
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    fn fresh_column_id(&self, name: &str) -> String {
        fresh_id(&format!("col_{}", name), self.columns.len(), |candidate| {
            self.column(candidate).is_some()
        })
    }
}

/// Relationship cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    OneToOne,
    #[default]
    OneToMany,
    ManyToMany,
}

impl RelationshipKind {
    /// Crow's-foot symbol emitted for this cardinality
    pub fn symbol(self) -> &'static str {
        match self {
            RelationshipKind::OneToOne => "||--||",
            RelationshipKind::OneToMany => "||--o{",
            RelationshipKind::ManyToMany => "}o--o{",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::OneToOne => write!(f, "one-to-one"),
            RelationshipKind::OneToMany => write!(f, "one-to-many"),
            RelationshipKind::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one-to-one" => Ok(RelationshipKind::OneToOne),
            "one-to-many" => Ok(RelationshipKind::OneToMany),
            "many-to-many" => Ok(RelationshipKind::ManyToMany),
            _ => Err(format!("Unknown relationship type: {}", s)),
        }
    }
}

/// A relationship between two tables, referenced by name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    /// The referenced ("one") side
    pub from_table: String,
    /// The side holding the foreign key
    pub to_table: String,
    pub from_column: String,
    pub to_column: String,
    #[serde(rename = "type", default)]
    pub kind: RelationshipKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Relationship {
    pub fn new(
        from_table: impl Into<String>,
        from_column: impl Into<String>,
        to_table: impl Into<String>,
        to_column: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            id: String::new(),
            from_table: from_table.into(),
            to_table: to_table.into(),
            from_column: from_column.into(),
            to_column: to_column.into(),
            kind,
            label: None,
        }
    }

    /// Relationship with conventionally inferred columns.
    ///
    /// The referenced column is `id` and the foreign key is
    /// `<lowercase from_table>_id`. Neither is checked against the tables.
    pub fn inferred(
        from_table: impl Into<String>,
        to_table: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        let from_table = from_table.into();
        let to_column = format!("{}_id", from_table.to_lowercase());
        Self::new(from_table, "id", to_table, to_column, kind)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The schema model: ordered tables and ordered relationships
///
/// No uniqueness is enforced on names. Direct edits address tables,
/// columns and relationships by id and fail only when the id is unknown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    /// First table whose name matches exactly
    pub fn table_named(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Compare content while ignoring ids and positions
    pub fn content_eq(&self, other: &SchemaModel) -> bool {
        self.without_identity() == other.without_identity()
    }

    /// A copy with every id cleared and every position reset
    pub fn without_identity(&self) -> SchemaModel {
        let mut model = self.clone();
        for table in &mut model.tables {
            table.id.clear();
            table.position = Position::default();
            for column in &mut table.columns {
                column.id.clear();
            }
        }
        for relationship in &mut model.relationships {
            relationship.id.clear();
        }
        model
    }

    fn table_or_err(&mut self, id: &str) -> Result<&mut Table, ErdError> {
        self.table_mut(id).ok_or_else(|| ErdError::unknown_table(id))
    }

    fn column_or_err(&mut self, table_id: &str, column_id: &str) -> Result<&mut Column, ErdError> {
        self.table_or_err(table_id)?
            .column_mut(column_id)
            .ok_or_else(|| ErdError::unknown_column(table_id, column_id))
    }

    /// Append a table with a fresh id and the next grid slot
    pub fn add_table(&mut self, name: impl Into<String>) -> &Table {
        let name = name.into();
        let index = self.tables.len();
        let id = fresh_id(&format!("table_{}", name), index, |candidate| {
            self.table(candidate).is_some()
        });
        debug!(table = %name, id = %id, "Adding table");
        self.tables.push(Table::new(id, name, Position::for_table(index)));
        &self.tables[index]
    }

    /// Rename a table, re-pointing relationships that used the old name.
    ///
    /// Relationships are left alone while another table still carries
    /// the old name.
    pub fn rename_table(&mut self, id: &str, name: impl Into<String>) -> Result<(), ErdError> {
        let name = name.into();
        let table = self.table_or_err(id)?;
        let old = std::mem::replace(&mut table.name, name.clone());

        if old == name || self.table_named(&old).is_some() {
            return Ok(());
        }
        for relationship in &mut self.relationships {
            if relationship.from_table == old {
                relationship.from_table = name.clone();
            }
            if relationship.to_table == old {
                relationship.to_table = name.clone();
            }
        }
        debug!(from = %old, to = %name, "Renamed table");
        Ok(())
    }

    /// Remove a table. Relationships naming it are kept and become dangling.
    pub fn remove_table(&mut self, id: &str) -> Result<Table, ErdError> {
        let index = self
            .tables
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ErdError::unknown_table(id))?;
        Ok(self.tables.remove(index))
    }

    pub fn move_table(&mut self, id: &str, position: Position) -> Result<(), ErdError> {
        self.table_or_err(id)?.position = position;
        Ok(())
    }

    /// Append a column, assigning a fresh id when it is empty or taken
    pub fn add_column(&mut self, table_id: &str, mut column: Column) -> Result<&Column, ErdError> {
        let table = self.table_or_err(table_id)?;
        if column.id.is_empty() || table.column(&column.id).is_some() {
            column.id = table.fresh_column_id(&column.name);
        }
        table.columns.push(column);
        Ok(&table.columns[table.columns.len() - 1])
    }

    pub fn rename_column(
        &mut self,
        table_id: &str,
        column_id: &str,
        name: impl Into<String>,
    ) -> Result<(), ErdError> {
        self.column_or_err(table_id, column_id)?.name = name.into();
        Ok(())
    }

    pub fn set_column_type(
        &mut self,
        table_id: &str,
        column_id: &str,
        data_type: impl Into<String>,
    ) -> Result<(), ErdError> {
        self.column_or_err(table_id, column_id)?.data_type = data_type.into();
        Ok(())
    }

    pub fn set_default_value(
        &mut self,
        table_id: &str,
        column_id: &str,
        value: Option<String>,
    ) -> Result<(), ErdError> {
        self.column_or_err(table_id, column_id)?.default_value = value;
        Ok(())
    }

    /// Flip one flag, leaving the other three untouched; returns the new value
    pub fn toggle_flag(
        &mut self,
        table_id: &str,
        column_id: &str,
        flag: ColumnFlag,
    ) -> Result<bool, ErdError> {
        let column = self.column_or_err(table_id, column_id)?;
        let value = !column.flag(flag);
        column.set_flag(flag, value);
        Ok(value)
    }

    pub fn remove_column(&mut self, table_id: &str, column_id: &str) -> Result<Column, ErdError> {
        let table = self.table_or_err(table_id)?;
        let index = table
            .columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| ErdError::unknown_column(table_id, column_id))?;
        Ok(table.columns.remove(index))
    }

    /// Append a relationship, assigning a fresh id when it is empty or taken
    pub fn add_relationship(&mut self, mut relationship: Relationship) -> &Relationship {
        if relationship.id.is_empty() || self.relationship(&relationship.id).is_some() {
            relationship.id = fresh_id("rel", self.relationships.len(), |candidate| {
                self.relationship(candidate).is_some()
            });
        }
        self.relationships.push(relationship);
        &self.relationships[self.relationships.len() - 1]
    }

    pub fn remove_relationship(&mut self, id: &str) -> Result<Relationship, ErdError> {
        let index = self
            .relationships
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ErdError::unknown_relationship(id))?;
        Ok(self.relationships.remove(index))
    }
}

/// `<prefix>_<n>` with the smallest `n >= start` not already taken
pub(crate) fn fresh_id(prefix: &str, start: usize, taken: impl Fn(&str) -> bool) -> String {
    let mut n = start;
    loop {
        let candidate = format!("{}_{}", prefix, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

impl Database for SchemaModel {
    type Node = Table;
    type Edge = Relationship;

    fn add_node(&mut self, node: Self::Node) -> anyhow::Result<()> {
        self.tables.push(node);
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> anyhow::Result<()> {
        self.relationships.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.table(id)
    }

    fn resolve_node(&self, name: &str) -> Option<&Self::Node> {
        self.table_named(name)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.tables.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relationships.iter()
    }

    fn clear(&mut self) {
        self.tables.clear();
        self.relationships.clear();
    }

    fn node_count(&self) -> usize {
        self.tables.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}
