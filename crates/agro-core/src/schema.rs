//! Esquemas declarativos de entrada/salida.
//!
//! Un `TypeSchema` es un mapeo ordenado nombre → `FieldSpec`; datos puros, sin
//! comportamiento. Cada modelo declara los suyos una vez y no los muta. La
//! validación del esquema en sí no se hace en runtime: un esquema malformado
//! (p. ej. `list` sin `element type`) es error de programación.

use indexmap::IndexMap;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Decimal,
    Integer,
    Text,
    Bool,
    Choice,
    List,
    Any,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Decimal => "decimal",
            FieldKind::Integer => "integer",
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::Choice => "choice",
            FieldKind::List => "list",
            FieldKind::Any => "any",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub description: String,
    pub digits: Option<u32>,
    pub default: Option<Value>,
    pub element_type: Option<TypeSchema>,
    pub primary_key: bool,
}

impl FieldSpec {
    fn new(kind: FieldKind, description: &str) -> Self {
        Self { kind,
               description: description.to_string(),
               digits: None,
               default: None,
               element_type: None,
               primary_key: false }
    }

    pub fn decimal(description: &str) -> Self {
        Self::new(FieldKind::Decimal, description)
    }

    pub fn integer(description: &str) -> Self {
        Self::new(FieldKind::Integer, description)
    }

    pub fn text(description: &str) -> Self {
        Self::new(FieldKind::Text, description)
    }

    pub fn boolean(description: &str) -> Self {
        Self::new(FieldKind::Bool, description)
    }

    pub fn choice(description: &str) -> Self {
        Self::new(FieldKind::Choice, description)
    }

    pub fn any(description: &str) -> Self {
        Self::new(FieldKind::Any, description)
    }

    pub fn list(description: &str, element_type: TypeSchema) -> Self {
        let mut spec = Self::new(FieldKind::List, description);
        spec.element_type = Some(element_type);
        spec
    }

    pub fn digits(mut self, digits: u32) -> Self {
        self.digits = Some(digits);
        self
    }

    pub fn default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn default_int(self, value: i64) -> Self {
        self.default(Value::Int(value))
    }

    pub fn default_dec(self, literal: &str) -> Self {
        self.default(Value::Decimal(crate::decimal::lit(literal)))
    }

    pub fn default_bool(self, value: bool) -> Self {
        self.default(Value::Bool(value))
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Forma de cable del campo (la que exponen `inputs`/`outputs` del CLI).
    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        out.insert("type".to_string(), serde_json::Value::String(self.kind.as_str().to_string()));
        out.insert("description".to_string(), serde_json::Value::String(self.description.clone()));
        if let Some(digits) = self.digits {
            out.insert("digits".to_string(), serde_json::Value::Number(digits.into()));
        }
        if let Some(default) = &self.default {
            out.insert("default".to_string(), default.to_json());
        }
        if let Some(element_type) = &self.element_type {
            out.insert("element type".to_string(), element_type.to_json());
        }
        if self.primary_key {
            out.insert("primary key".to_string(), serde_json::Value::Bool(true));
        }
        serde_json::Value::Object(out)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeSchema {
    fields: IndexMap<String, FieldSpec>,
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declara un campo manteniendo el orden de declaración.
    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.fields.insert(name.to_string(), spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldSpec)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        for (name, spec) in &self.fields {
            out.insert(name.clone(), spec.to_json());
        }
        serde_json::Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_preserved() {
        let schema = TypeSchema::new().field("b", FieldSpec::decimal("b"))
                                      .field("a", FieldSpec::decimal("a"));
        let keys: Vec<&String> = schema.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn wire_shape_uses_original_key_names() {
        let element = TypeSchema::new().field("id", FieldSpec::integer("id").primary_key());
        let schema = TypeSchema::new().field("xs", FieldSpec::list("items", element))
                                      .field("cost", FieldSpec::decimal("cost").digits(2).default_dec("0.1"));
        let json = schema.to_json();
        assert_eq!(json["xs"]["type"], "list");
        assert_eq!(json["xs"]["element type"]["id"]["primary key"], true);
        assert_eq!(json["cost"]["digits"], 2);
    }
}
