//! Request-body form: the root object editor for the selected operation.

use serde_json::Value;
use std::sync::Arc;

use crate::discovery::{ApiService, AppState, ServiceContext};
use crate::editor::{Editor, EditorPath, EditorView, ObjectSchemaEditor};
use crate::error::EditorError;
use crate::schema::Schema;

/// Owns the editor tree for one schema selection and routes path-addressed
/// edit actions into it.
#[derive(Clone)]
pub struct SchemaForm {
    context: Arc<dyn ServiceContext>,
    root: Option<Editor>,
}

impl SchemaForm {
    pub fn new(context: Arc<dyn ServiceContext>) -> Self {
        Self {
            context,
            root: None,
        }
    }

    pub fn context(&self) -> &dyn ServiceContext {
        self.context.as_ref()
    }

    /// Replace the context. The current tree is discarded since its required
    /// properties may differ under the new operation.
    pub fn set_context(&mut self, context: Arc<dyn ServiceContext>) {
        self.context = context;
        self.root = None;
    }

    /// Build a fresh tree over a schema's properties, discarding any prior
    /// one.
    pub fn set_schema(&mut self, schema: &Schema) {
        let editor = ObjectSchemaEditor::for_schema(self.context.as_ref(), schema);
        tracing::debug!(
            schema = schema.id.as_deref().unwrap_or("<anonymous>"),
            required = editor.rows().len(),
            "Schema form built"
        );
        self.root = Some(Editor::Object(editor));
    }

    /// Select a method of a service and load its request schema. Methods
    /// without a request body leave the form inactive.
    pub fn set_method(&mut self, service: Arc<ApiService>, method_key: &str) {
        let state = AppState::new(service).with_method(method_key);
        let schema = state
            .current_method()
            .filter(|method| method.http_method.accepts_body())
            .and_then(|method| state.service().request_schema(method))
            .cloned();
        self.set_context(Arc::new(state));
        if let Some(schema) = schema {
            self.set_schema(&schema);
        }
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    pub fn is_active(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Editor> {
        self.root.as_ref()
    }

    pub fn json_value(&self) -> Option<Value> {
        self.root.as_ref().map(Editor::json_value)
    }

    /// Request body text. Empty when no schema is active or nothing was
    /// entered.
    pub fn string_value(&self) -> String {
        match self.json_value() {
            None => String::new(),
            Some(value) => {
                let text = value.to_string();
                if text == "{}" {
                    String::new()
                } else {
                    text
                }
            }
        }
    }

    pub fn render(&self) -> Option<EditorView> {
        self.root.as_ref().map(Editor::render)
    }

    pub fn editor_at(&self, path: &EditorPath) -> Result<&Editor, EditorError> {
        self.root
            .as_ref()
            .ok_or(EditorError::NoSchema)?
            .editor_at(path)
    }

    fn editor_at_mut(&mut self, path: &EditorPath) -> Result<&mut Editor, EditorError> {
        self.root
            .as_mut()
            .ok_or(EditorError::NoSchema)?
            .editor_at_mut(path)
    }

    /// Option picked in the add-property control of the object at `path`.
    pub fn select_property(
        &mut self,
        path: &EditorPath,
        index: usize,
    ) -> Result<Option<String>, EditorError> {
        let ctx = self.context.clone();
        match self.editor_at_mut(path)? {
            Editor::Object(obj) => obj.select(ctx.as_ref(), index),
            other => Err(wrong_kind(path, "object", other)),
        }
    }

    pub fn add_property(&mut self, path: &EditorPath, key: &str) -> Result<(), EditorError> {
        let ctx = self.context.clone();
        match self.editor_at_mut(path)? {
            Editor::Object(obj) => obj.add_property(ctx.as_ref(), key),
            other => Err(wrong_kind(path, "object", other)),
        }
    }

    pub fn remove_property(&mut self, path: &EditorPath, key: &str) -> Result<(), EditorError> {
        match self.editor_at_mut(path)? {
            Editor::Object(obj) => obj.remove_property(key),
            other => Err(wrong_kind(path, "object", other)),
        }
    }

    /// Append an element to the array at `path`, returning its id.
    pub fn add_item(&mut self, path: &EditorPath) -> Result<u64, EditorError> {
        let ctx = self.context.clone();
        match self.editor_at_mut(path)? {
            Editor::Array(arr) => Ok(arr.add_item(ctx.as_ref())),
            other => Err(wrong_kind(path, "array", other)),
        }
    }

    pub fn remove_item(&mut self, path: &EditorPath, index: usize) -> Result<(), EditorError> {
        match self.editor_at_mut(path)? {
            Editor::Array(arr) => arr.remove_item(index),
            other => Err(wrong_kind(path, "array", other)),
        }
    }

    /// Set the text of the string or number editor at `path`.
    pub fn set_text(&mut self, path: &EditorPath, text: &str) -> Result<(), EditorError> {
        match self.editor_at_mut(path)? {
            Editor::String(e) => e.set_value(text),
            Editor::Number(e) => e.set_text(text),
            other => return Err(wrong_kind(path, "string or number", other)),
        }
        Ok(())
    }

    pub fn set_checked(&mut self, path: &EditorPath, checked: bool) -> Result<(), EditorError> {
        match self.editor_at_mut(path)? {
            Editor::Boolean(e) => {
                e.set_checked(checked);
                Ok(())
            }
            other => Err(wrong_kind(path, "boolean", other)),
        }
    }
}

fn wrong_kind(path: &EditorPath, expected: &'static str, actual: &Editor) -> EditorError {
    EditorError::WrongKind {
        path: path.to_string(),
        expected,
        actual: actual.kind(),
    }
}
