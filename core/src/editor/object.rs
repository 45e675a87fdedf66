//! Object editor with a user-extensible set of properties.
//!
//! Required properties for the current operation are added when the editor is
//! built and cannot be removed. Optional properties are added from the
//! "available" list on demand, and go back to it when removed.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::discovery::ServiceContext;
use crate::error::EditorError;
use crate::schema::Schema;

use super::{Editor, EditorFactory, EditorView, ObjectRowView};

/// Placeholder entry at the top of the add-property control.
pub const ADD_PROPERTY: &str = "-- add a property --";

/// One materialized key/value pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRow {
    key: String,
    required: bool,
    property: Schema,
    editor: Editor,
}

impl ObjectRow {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Required rows have no remove affordance.
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn property(&self) -> &Schema {
        &self.property
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    fn render(&self) -> ObjectRowView {
        ObjectRowView {
            key: self.key.clone(),
            label: format!("\"{}\"", self.key),
            description: self.property.description.clone(),
            type_label: self.property.type_label(),
            removable: !self.required,
            editor: self.editor.render(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSchemaEditor {
    properties: BTreeMap<String, Schema>,
    /// Display order.
    rows: Vec<ObjectRow>,
    /// Keys not yet materialized, sorted.
    available: Vec<String>,
}

impl ObjectSchemaEditor {
    /// Build an editor over a property map, materializing the properties
    /// required by the context's current operation.
    pub fn new(ctx: &dyn ServiceContext, properties: BTreeMap<String, Schema>) -> Self {
        Self::build(ctx, properties, &mut Vec::new(), true)
    }

    /// Build an editor over a named or anonymous object schema.
    pub fn for_schema(ctx: &dyn ServiceContext, schema: &Schema) -> Self {
        let mut expanding: Vec<String> = schema.id.iter().cloned().collect();
        Self::build(ctx, schema.properties.clone(), &mut expanding, true)
    }

    pub(crate) fn build(
        ctx: &dyn ServiceContext,
        properties: BTreeMap<String, Schema>,
        expanding: &mut Vec<String>,
        expand_required: bool,
    ) -> Self {
        let available: Vec<String> = properties.keys().cloned().collect();
        let mut editor = Self {
            properties,
            rows: Vec::new(),
            available,
        };

        let Some(method_id) = ctx.current_method_id().filter(|_| expand_required) else {
            return editor;
        };

        let required: Vec<String> = editor
            .properties
            .iter()
            .filter(|(_, prop)| prop.required_for_method(method_id))
            .map(|(key, _)| key.clone())
            .collect();

        for key in required {
            let cyclic = editor.properties[&key]
                .reference
                .as_ref()
                .map(|name| expanding.contains(name))
                .unwrap_or(false);
            if cyclic {
                tracing::debug!(
                    property = %key,
                    method = method_id,
                    "Required property refers back to a schema being built, not expanding it"
                );
            }
            editor.materialize(ctx, &key, true, expanding, !cyclic);
        }

        editor
    }

    fn materialize(
        &mut self,
        ctx: &dyn ServiceContext,
        key: &str,
        required: bool,
        expanding: &mut Vec<String>,
        expand_required: bool,
    ) {
        let property = self.properties[key].clone();
        let editor = EditorFactory::build(ctx, &property, expanding, expand_required);
        self.rows.push(ObjectRow {
            key: key.to_string(),
            required,
            property,
            editor,
        });
        self.available.retain(|k| k != key);
    }

    /// Entries of the add-property control: the placeholder, then the
    /// available keys.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(ADD_PROPERTY.to_string())
            .chain(self.available.iter().cloned())
            .collect()
    }

    /// Whether the add-property control is shown.
    pub fn can_add(&self) -> bool {
        !self.available.is_empty()
    }

    /// Handle a selection in the add-property control. Index 0 is the
    /// placeholder and does nothing. Returns the key that was added.
    pub fn select(
        &mut self,
        ctx: &dyn ServiceContext,
        index: usize,
    ) -> Result<Option<String>, EditorError> {
        if index == 0 {
            return Ok(None);
        }
        let key = self
            .available
            .get(index - 1)
            .cloned()
            .ok_or(EditorError::IndexOutOfRange {
                index,
                len: self.available.len() + 1,
            })?;
        self.add_property(ctx, &key)?;
        Ok(Some(key))
    }

    /// Materialize an optional property chosen by the user.
    pub fn add_property(&mut self, ctx: &dyn ServiceContext, key: &str) -> Result<(), EditorError> {
        if !self.properties.contains_key(key) {
            return Err(EditorError::UnknownProperty(key.to_string()));
        }
        if self.is_materialized(key) {
            return Err(EditorError::AlreadyAdded(key.to_string()));
        }
        self.materialize(ctx, key, false, &mut Vec::new(), true);
        tracing::debug!(property = key, remaining = self.available.len(), "Property added");
        Ok(())
    }

    /// Drop an optional property's editor and return its key to the
    /// available list.
    pub fn remove_property(&mut self, key: &str) -> Result<(), EditorError> {
        let pos = self
            .rows
            .iter()
            .position(|row| row.key == key)
            .ok_or_else(|| EditorError::NotAdded(key.to_string()))?;
        if self.rows[pos].required {
            return Err(EditorError::Required(key.to_string()));
        }

        let row = self.rows.remove(pos);
        self.available.push(row.key);
        self.available.sort();
        tracing::debug!(property = key, "Property removed");
        Ok(())
    }

    pub fn is_materialized(&self, key: &str) -> bool {
        self.rows.iter().any(|row| row.key == key)
    }

    pub fn properties(&self) -> &BTreeMap<String, Schema> {
        &self.properties
    }

    pub fn rows(&self) -> &[ObjectRow] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&ObjectRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn row_mut(&mut self, key: &str) -> Option<&mut ObjectRow> {
        self.rows.iter_mut().find(|row| row.key == key)
    }

    /// Materialized keys in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn render(&self) -> EditorView {
        EditorView::Object {
            rows: self.rows.iter().map(ObjectRow::render).collect(),
            options: self.can_add().then(|| self.options()),
        }
    }

    /// Object of exactly the materialized keys, in display order.
    pub fn json_value(&self) -> Value {
        let mut obj = Map::new();
        for row in &self.rows {
            obj.insert(row.key.clone(), row.editor.json_value());
        }
        Value::Object(obj)
    }
}
