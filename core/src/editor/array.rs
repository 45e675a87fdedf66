//! Editor for an ordered list of homogeneous elements.

use serde_json::Value;

use crate::discovery::ServiceContext;
use crate::error::EditorError;
use crate::schema::Schema;

use super::{ArrayItemView, Editor, EditorFactory, EditorView};

/// One element of an array editor. The id is stable across removals so the
/// UI can key rows by it.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayElement {
    id: u64,
    editor: Editor,
}

impl ArrayElement {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArraySchemaEditor {
    items: Schema,
    elements: Vec<ArrayElement>,
    next_id: u64,
}

impl ArraySchemaEditor {
    /// Starts empty regardless of any default.
    pub fn new(items: Schema) -> Self {
        Self {
            items,
            elements: Vec::new(),
            next_id: 0,
        }
    }

    pub fn items(&self) -> &Schema {
        &self.items
    }

    /// Append a fresh element built from the item schema. Returns its id.
    pub fn add_item(&mut self, ctx: &dyn ServiceContext) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.elements.push(ArrayElement {
            id,
            editor: EditorFactory::for_schema(ctx, &self.items),
        });
        tracing::debug!(id, len = self.elements.len(), "Array item added");
        id
    }

    /// Remove the element at a position. Later elements shift down.
    pub fn remove_item(&mut self, index: usize) -> Result<(), EditorError> {
        if index >= self.elements.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        }
        self.elements.remove(index);
        Ok(())
    }

    pub fn elements(&self) -> &[ArrayElement] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&ArrayElement> {
        self.elements.get(index)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut ArrayElement> {
        self.elements.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn render(&self) -> EditorView {
        EditorView::Array {
            items: self
                .elements
                .iter()
                .map(|e| ArrayItemView {
                    id: e.id,
                    editor: e.editor.render(),
                })
                .collect(),
        }
    }

    pub fn json_value(&self) -> Value {
        Value::Array(self.elements.iter().map(|e| e.editor.json_value()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{ApiService, AppState};
    use crate::schema::SchemaType;
    use serde_json::json;
    use std::sync::Arc;

    fn context() -> AppState {
        AppState::new(Arc::new(ApiService::new("test", "v1")))
    }

    fn set_text(editor: &mut Editor, text: &str) {
        match editor {
            Editor::String(e) => e.set_value(text),
            Editor::Number(e) => e.set_text(text),
            other => panic!("not a text editor: {}", other.kind()),
        }
    }

    #[test]
    fn test_remove_middle_item_keeps_order() {
        let ctx = context();
        let mut editor = ArraySchemaEditor::new(Schema::of_type(SchemaType::String));
        for text in ["one", "two", "three"] {
            editor.add_item(&ctx);
            let last = editor.len() - 1;
            set_text(editor.element_mut(last).unwrap().editor_mut(), text);
        }

        editor.remove_item(1).unwrap();
        assert_eq!(editor.json_value(), json!(["one", "three"]));
        let ids: Vec<u64> = editor.elements().iter().map(ArrayElement::id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_ids_not_reused() {
        let ctx = context();
        let mut editor = ArraySchemaEditor::new(Schema::of_type(SchemaType::Integer));
        assert_eq!(editor.add_item(&ctx), 0);
        editor.remove_item(0).unwrap();
        assert_eq!(editor.add_item(&ctx), 1);
        assert_eq!(editor.json_value(), json!([""]));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut editor = ArraySchemaEditor::new(Schema::default());
        assert!(editor.is_empty());
        assert_eq!(
            editor.remove_item(0),
            Err(EditorError::IndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(editor.json_value(), json!([]));
    }

    #[test]
    fn test_object_items() {
        let ctx = context();
        let item = Schema::object([("url", Schema::of_type(SchemaType::String))]);
        let mut editor = ArraySchemaEditor::new(item);
        editor.add_item(&ctx);
        editor.add_item(&ctx);
        assert_eq!(editor.json_value(), json!([{}, {}]));
    }
}
