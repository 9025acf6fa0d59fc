//! Declarative entity schema.
//!
//! This is the one contract the crate exposes to collaborating layers (UI
//! rendering, access control): the entity name, its default ordering, and a
//! field list with types, constraints, defaults, and help text. Collaborators
//! introspect this instead of reaching into [`Record`](crate::Record)
//! internals.

use serde::Serialize;
use serde_json::{json, Value};

use crate::query::{default_order, SortKey};

/// Canonical name of the record entity.
pub const ENTITY_NAME: &str = "sample.model";

/// Storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Short, single-line text.
    Char,
    /// Long-form text, unconstrained length.
    Text,
    Integer,
    Boolean,
    DateTime,
}

/// One field declaration.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    /// Must be non-empty/non-null for every persisted record.
    pub required: bool,
    /// Callers cannot set or change this field.
    pub readonly: bool,
    /// Value is produced by the store itself (id, timestamps, audit columns).
    pub store_assigned: bool,
    /// Default applied when the caller omits the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human help text for generated forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl FieldDef {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
            readonly: false,
            store_assigned: false,
            default: None,
            help: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn store_assigned(mut self) -> Self {
        self.readonly = true;
        self.store_assigned = true;
        self
    }

    fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    fn help(mut self, text: &str) -> Self {
        self.help = Some(text.to_string());
        self
    }
}

/// The full schema of one entity: name, description, default order, fields.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySchema {
    pub name: String,
    pub description: String,
    pub default_order: Vec<SortKey>,
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all fields a caller must supply on create.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required && !f.store_assigned)
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// The schema of the `sample.model` entity.
pub fn sample_record_schema() -> EntitySchema {
    EntitySchema {
        name: ENTITY_NAME.to_string(),
        description: "Sample Model".to_string(),
        default_order: default_order(),
        fields: vec![
            FieldDef::new("id", FieldKind::Integer).store_assigned(),
            FieldDef::new("name", FieldKind::Char)
                .required()
                .help("Enter a descriptive name for this record"),
            FieldDef::new("description", FieldKind::Text)
                .help("Detailed description of this record"),
            FieldDef::new("active", FieldKind::Boolean)
                .default_value(json!(true))
                .help("Uncheck to archive this record"),
            FieldDef::new("created_at", FieldKind::DateTime).store_assigned(),
            FieldDef::new("updated_at", FieldKind::DateTime).store_assigned(),
            FieldDef::new("created_by", FieldKind::Char).store_assigned(),
            FieldDef::new("updated_by", FieldKind::Char).store_assigned(),
        ],
    }
}
