//! Schema-driven editors.
//!
//! Every schema node maps to one closed editor variant. Object and array
//! editors own their children; nothing is shared between trees. Named schemas
//! referenced through `$ref` are resolved one level at a time, when a key is
//! materialized, so cyclic schema graphs are never walked eagerly.

pub mod array;
pub mod object;
pub mod path;
pub mod scalar;

pub use array::{ArrayElement, ArraySchemaEditor};
pub use object::{ObjectRow, ObjectSchemaEditor, ADD_PROPERTY};
pub use path::{EditorPath, PathSegment};
pub use scalar::{BooleanEditor, NumberEditor, StringEditor};

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::discovery::ServiceContext;
use crate::error::EditorError;
use crate::schema::{Schema, SchemaType};

/// An editor for one value of a request body.
#[derive(Clone, Debug, PartialEq)]
pub enum Editor {
    String(StringEditor),
    Number(NumberEditor),
    Boolean(BooleanEditor),
    Object(ObjectSchemaEditor),
    Array(ArraySchemaEditor),
}

impl Editor {
    pub fn kind(&self) -> &'static str {
        match self {
            Editor::String(_) => "string",
            Editor::Number(_) => "number",
            Editor::Boolean(_) => "boolean",
            Editor::Object(_) => "object",
            Editor::Array(_) => "array",
        }
    }

    /// Snapshot of what the UI should display for this editor and its children.
    pub fn render(&self) -> EditorView {
        match self {
            Editor::String(e) => e.render(),
            Editor::Number(e) => e.render(),
            Editor::Boolean(e) => e.render(),
            Editor::Object(e) => e.render(),
            Editor::Array(e) => e.render(),
        }
    }

    /// JSON value of the current state of this editor.
    pub fn json_value(&self) -> Value {
        match self {
            Editor::String(e) => e.json_value(),
            Editor::Number(e) => e.json_value(),
            Editor::Boolean(e) => e.json_value(),
            Editor::Object(e) => e.json_value(),
            Editor::Array(e) => e.json_value(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchemaEditor> {
        match self {
            Editor::Object(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchemaEditor> {
        match self {
            Editor::Array(e) => Some(e),
            _ => None,
        }
    }

    fn child(&self, segment: &PathSegment) -> Option<&Editor> {
        match (self, segment) {
            (Editor::Object(obj), PathSegment::Property(key)) => obj.row(key).map(|r| r.editor()),
            (Editor::Array(arr), PathSegment::Index(idx)) => arr.element(*idx).map(|e| e.editor()),
            _ => None,
        }
    }

    fn child_mut(&mut self, segment: &PathSegment) -> Option<&mut Editor> {
        match (self, segment) {
            (Editor::Object(obj), PathSegment::Property(key)) => {
                obj.row_mut(key).map(|r| r.editor_mut())
            }
            (Editor::Array(arr), PathSegment::Index(idx)) => {
                arr.element_mut(*idx).map(|e| e.editor_mut())
            }
            _ => None,
        }
    }

    /// Descend to a nested editor.
    pub fn editor_at(&self, path: &EditorPath) -> Result<&Editor, EditorError> {
        let mut current = self;
        for segment in path.segments() {
            current = current
                .child(segment)
                .ok_or_else(|| EditorError::PathNotFound(path.to_string()))?;
        }
        Ok(current)
    }

    /// Descend to a nested editor for modification.
    pub fn editor_at_mut(&mut self, path: &EditorPath) -> Result<&mut Editor, EditorError> {
        let mut current = self;
        for segment in path.segments() {
            current = current
                .child_mut(segment)
                .ok_or_else(|| EditorError::PathNotFound(path.to_string()))?;
        }
        Ok(current)
    }
}

/// Maps schema nodes to editors.
pub struct EditorFactory;

impl EditorFactory {
    /// Build the editor for a property.
    ///
    /// A `$ref` always yields an object editor over the referenced schema's
    /// properties; a reference to an unknown schema yields an empty object
    /// editor. Otherwise the type tag decides, with strings as the fallback.
    pub fn for_schema(ctx: &dyn ServiceContext, property: &Schema) -> Editor {
        Self::build(ctx, property, &mut Vec::new(), true)
    }

    /// `expanding` holds the named schemas whose required properties are
    /// being materialized further up this construction. With
    /// `expand_required` unset, an object editor starts with no rows; required
    /// `$ref` cycles are built that way so they stop after one level.
    pub(crate) fn build(
        ctx: &dyn ServiceContext,
        property: &Schema,
        expanding: &mut Vec<String>,
        expand_required: bool,
    ) -> Editor {
        if let Some(name) = &property.reference {
            let properties = match ctx.schema(name) {
                Some(schema) => schema.properties.clone(),
                None => {
                    tracing::warn!(schema = %name, "Referenced schema not found, using an empty object");
                    BTreeMap::new()
                }
            };
            expanding.push(name.clone());
            let editor = ObjectSchemaEditor::build(ctx, properties, expanding, expand_required);
            expanding.pop();
            return Editor::Object(editor);
        }

        match property.schema_type {
            Some(SchemaType::Object) => Editor::Object(ObjectSchemaEditor::build(
                ctx,
                property.properties.clone(),
                expanding,
                expand_required,
            )),
            Some(SchemaType::Array) => {
                let items = property
                    .items
                    .as_deref()
                    .cloned()
                    .unwrap_or_else(|| Schema::of_type(SchemaType::Any));
                Editor::Array(ArraySchemaEditor::new(items))
            }
            Some(SchemaType::Boolean) => Editor::Boolean(BooleanEditor::new(property)),
            Some(SchemaType::Integer) | Some(SchemaType::Number) => {
                Editor::Number(NumberEditor::new(property))
            }
            Some(SchemaType::String) | Some(SchemaType::Any) | Some(SchemaType::Unknown) | None => {
                Editor::String(StringEditor::new(property))
            }
        }
    }
}

/// Display model of an editor tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorView {
    String {
        value: String,
    },
    Number {
        text: String,
    },
    Boolean {
        checked: bool,
    },
    Object {
        rows: Vec<ObjectRowView>,
        /// Entries of the add-property control, placeholder first. `None`
        /// when every property is already shown.
        options: Option<Vec<String>>,
    },
    Array {
        items: Vec<ArrayItemView>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectRowView {
    pub key: String,
    /// Quoted key as displayed, e.g. `"title"`.
    pub label: String,
    pub description: Option<String>,
    pub type_label: String,
    pub removable: bool,
    pub editor: EditorView,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayItemView {
    pub id: u64,
    pub editor: EditorView,
}
