//! Leaf editors for string, number, and boolean values.

use serde_json::{Number, Value};

use crate::schema::Schema;

use super::EditorView;

/// Editor for string values. Holds the text verbatim; the quotes shown around
/// it are presentational only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StringEditor {
    value: String,
}

impl StringEditor {
    pub fn new(property: &Schema) -> Self {
        Self {
            value: property.default.clone().unwrap_or_default(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn render(&self) -> EditorView {
        EditorView::String {
            value: self.value.clone(),
        }
    }

    pub fn json_value(&self) -> Value {
        Value::String(self.value.clone())
    }
}

/// Editor for integer and number values.
///
/// Text that does not parse as a finite number is sent as a JSON string
/// instead; this is never reported as an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberEditor {
    text: String,
}

impl NumberEditor {
    pub fn new(property: &Schema) -> Self {
        Self {
            text: property.default.clone().unwrap_or_default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn render(&self) -> EditorView {
        EditorView::Number {
            text: self.text.clone(),
        }
    }

    pub fn json_value(&self) -> Value {
        parse_number(&self.text).unwrap_or_else(|| Value::String(self.text.clone()))
    }
}

/// Parse user text as a JSON number. Integral text stays an integer.
pub fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(u) = trimmed.parse::<u64>() {
        return Some(Value::from(u));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Checkbox editor for boolean values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BooleanEditor {
    checked: bool,
}

impl BooleanEditor {
    /// Checked only when the default is exactly `"true"`.
    pub fn new(property: &Schema) -> Self {
        Self {
            checked: property.default.as_deref() == Some("true"),
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn render(&self) -> EditorView {
        EditorView::Boolean {
            checked: self.checked,
        }
    }

    pub fn json_value(&self) -> Value {
        Value::Bool(self.checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;
    use serde_json::json;

    #[test]
    fn test_string_editor_uses_default() {
        let prop = Schema::of_type(SchemaType::String).with_default("hello \"world\"");
        let mut editor = StringEditor::new(&prop);
        assert_eq!(editor.json_value(), json!("hello \"world\""));

        editor.set_value("");
        assert_eq!(editor.json_value(), json!(""));
        assert_eq!(StringEditor::new(&Schema::default()).value(), "");
    }

    #[test]
    fn test_number_editor_parses_default() {
        let editor = NumberEditor::new(&Schema::of_type(SchemaType::Number).with_default("3.5"));
        assert_eq!(editor.json_value(), json!(3.5));

        let editor = NumberEditor::new(&Schema::of_type(SchemaType::Integer).with_default("42"));
        assert_eq!(editor.json_value(), json!(42));
        assert_eq!(editor.json_value().to_string(), "42");
    }

    #[test]
    fn test_number_editor_falls_back_to_string() {
        let editor = NumberEditor::new(&Schema::of_type(SchemaType::Number).with_default("abc"));
        assert_eq!(editor.json_value(), json!("abc"));

        let mut editor = NumberEditor::default();
        assert_eq!(editor.json_value(), json!(""));

        editor.set_text("NaN");
        assert_eq!(editor.json_value(), json!("NaN"));

        editor.set_text(" -7 ");
        assert_eq!(editor.json_value(), json!(-7));

        editor.set_text("1e3");
        assert_eq!(editor.json_value(), json!(1000.0));
    }

    #[test]
    fn test_boolean_editor_default_literal() {
        let checked = |default: Option<&str>| {
            let mut prop = Schema::of_type(SchemaType::Boolean);
            prop.default = default.map(String::from);
            BooleanEditor::new(&prop).json_value()
        };

        assert_eq!(checked(Some("true")), json!(true));
        assert_eq!(checked(Some("TRUE")), json!(false));
        assert_eq!(checked(Some("1")), json!(false));
        assert_eq!(checked(None), json!(false));
    }
}
