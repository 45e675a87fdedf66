//! Schema descriptions of request and response bodies.
//!
//! A [`Schema`] is one node of a named, possibly cyclic graph: top-level
//! schemas are registered by id on the service, and properties may point back
//! at them through `$ref`. Nothing here walks that graph eagerly.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Annotation naming the operations a property is required for.
pub const REQUIRED_ANNOTATION: &str = "required";
/// Annotation naming the operations a property may be changed by.
pub const MUTABLE_ANNOTATION: &str = "mutable";

/// Type tag of a schema node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Array,
    Object,
    Boolean,
    Integer,
    Number,
    Any,
    /// Any tag this explorer does not know; edited as a string.
    #[serde(other)]
    Unknown,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Boolean => "boolean",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Any => "any",
            SchemaType::Unknown => "unknown",
        }
    }
}

/// Description of a value: its type and, for objects and arrays, the shape of
/// its children.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Unique name of a top-level schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Name of the top-level schema this node delegates its shape to.
    #[serde(default, rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(
        default,
        deserialize_with = "deserialize_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Annotation name -> operation identifiers it applies to.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, BTreeSet<String>>,
}

impl Schema {
    /// Create an anonymous schema of the given type.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Create a property that refers to a named top-level schema.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            reference: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create an object schema with the given properties.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Default::default()
        }
    }

    /// Create an array schema of the given item schema.
    pub fn array(items: Schema) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this property as required for an operation.
    pub fn required_for(mut self, method_id: impl Into<String>) -> Self {
        self.annotate(REQUIRED_ANNOTATION, method_id);
        self
    }

    /// Mark this property as mutable for an operation.
    pub fn mutable_for(mut self, method_id: impl Into<String>) -> Self {
        self.annotate(MUTABLE_ANNOTATION, method_id);
        self
    }

    fn annotate(&mut self, annotation: &str, method_id: impl Into<String>) {
        self.annotations
            .entry(annotation.to_string())
            .or_default()
            .insert(method_id.into());
    }

    fn annotated(&self, annotation: &str, method_id: &str) -> bool {
        self.annotations
            .get(annotation)
            .map(|ids| ids.contains(method_id))
            .unwrap_or(false)
    }

    /// Whether the property must be sent with the given operation.
    pub fn required_for_method(&self, method_id: &str) -> bool {
        self.annotated(REQUIRED_ANNOTATION, method_id)
    }

    /// Whether the property may be set by the given operation. Required
    /// properties are always mutable.
    pub fn mutable_for_method(&self, method_id: &str) -> bool {
        self.required_for_method(method_id) || self.annotated(MUTABLE_ANNOTATION, method_id)
    }

    /// Effective type tag. A `$ref` always means an object.
    pub fn effective_type(&self) -> SchemaType {
        if self.reference.is_some() {
            return SchemaType::Object;
        }
        self.schema_type.unwrap_or(SchemaType::String)
    }

    /// Short type label for display, e.g. `string`, `array`, or the referenced
    /// schema name.
    pub fn type_label(&self) -> String {
        match &self.reference {
            Some(name) => name.clone(),
            None => self.effective_type().as_str().to_string(),
        }
    }
}

/// Defaults are string-encoded, but documents sometimes carry bare scalars.
fn deserialize_default<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
