// SPDX-FileCopyrightText: 2026 FlowForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positional editing of a [`SchemaData`].
//!
//! Every operation addresses tables and columns by index and fails with
//! [`FlowforgeError::IndexOutOfRange`] instead of panicking. No referential
//! checks are made: a `REFERENCES` constraint naming a missing table is kept
//! as opaque text.

use flowforge_core::{Column, FlowforgeError, SchemaData, Table};

use crate::catalog::Constraint;

/// Name given to columns created by [`SchemaEditor::add_column`].
pub const DEFAULT_COLUMN_NAME: &str = "new_column";
/// Type given to columns created by [`SchemaEditor::add_column`].
pub const DEFAULT_COLUMN_TYPE: &str = "TEXT";

/// A single field replacement for [`SchemaEditor::set_column_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnField {
    Name(String),
    Type(String),
    /// Replaces the whole list.
    Constraints(Vec<String>),
}

/// Whether a toggle added or removed the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    /// Number of entries removed.
    Removed(usize),
}

/// Mutable view over a schema's tables.
#[derive(Debug)]
pub struct SchemaEditor<'a> {
    schema: &'a mut SchemaData,
}

impl<'a> SchemaEditor<'a> {
    pub fn new(schema: &'a mut SchemaData) -> Self {
        Self { schema }
    }

    pub fn tables(&self) -> &[Table] {
        &self.schema.tables
    }

    /// Appends an empty table and returns its index.
    pub fn add_table(&mut self, name: impl Into<String>) -> usize {
        self.schema.tables.push(Table {
            name: name.into(),
            columns: Vec::new(),
        });
        self.schema.tables.len() - 1
    }

    pub fn remove_table(&mut self, table: usize) -> Result<Table, FlowforgeError> {
        self.check_table(table)?;
        Ok(self.schema.tables.remove(table))
    }

    pub fn rename_table(
        &mut self,
        table: usize,
        name: impl Into<String>,
    ) -> Result<(), FlowforgeError> {
        self.table_mut(table)?.name = name.into();
        Ok(())
    }

    /// Appends `new_column TEXT` with no constraints and returns its index.
    pub fn add_column(&mut self, table: usize) -> Result<usize, FlowforgeError> {
        let columns = &mut self.table_mut(table)?.columns;
        columns.push(Column::new(DEFAULT_COLUMN_NAME, DEFAULT_COLUMN_TYPE));
        Ok(columns.len() - 1)
    }

    /// Removes and returns the column at `column`.
    pub fn remove_column(
        &mut self,
        table: usize,
        column: usize,
    ) -> Result<Column, FlowforgeError> {
        let columns = &mut self.table_mut(table)?.columns;
        if column >= columns.len() {
            return Err(FlowforgeError::out_of_range("column", column, columns.len()));
        }
        Ok(columns.remove(column))
    }

    pub fn set_column_field(
        &mut self,
        table: usize,
        column: usize,
        field: ColumnField,
    ) -> Result<(), FlowforgeError> {
        let target = self.column_mut(table, column)?;
        match field {
            ColumnField::Name(name) => target.name = name,
            ColumnField::Type(data_type) => target.data_type = data_type,
            ColumnField::Constraints(constraints) => target.constraints = constraints,
        }
        Ok(())
    }

    /// Removes every constraint that mentions the token, or appends the
    /// canonical token when none does. A lowercase or extended spelling is
    /// therefore replaced by the bare token after two toggles.
    pub fn toggle_constraint(
        &mut self,
        table: usize,
        column: usize,
        constraint: Constraint,
    ) -> Result<Toggle, FlowforgeError> {
        let constraints = &mut self.column_mut(table, column)?.constraints;
        let before = constraints.len();
        constraints.retain(|c| !constraint.matches(c));

        let removed = before - constraints.len();
        if removed > 0 {
            Ok(Toggle::Removed(removed))
        } else {
            constraints.push(constraint.token().to_string());
            Ok(Toggle::Added)
        }
    }

    fn check_table(&self, table: usize) -> Result<(), FlowforgeError> {
        let len = self.schema.tables.len();
        if table < len {
            Ok(())
        } else {
            Err(FlowforgeError::out_of_range("table", table, len))
        }
    }

    fn table_mut(&mut self, table: usize) -> Result<&mut Table, FlowforgeError> {
        self.check_table(table)?;
        Ok(&mut self.schema.tables[table])
    }

    fn column_mut(&mut self, table: usize, column: usize) -> Result<&mut Column, FlowforgeError> {
        let columns = &mut self.table_mut(table)?.columns;
        let len = columns.len();
        columns
            .get_mut(column)
            .ok_or_else(|| FlowforgeError::out_of_range("column", column, len))
    }
}
