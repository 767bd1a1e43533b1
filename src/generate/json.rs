// ==============================================================================
// JSON Descriptor Plugin
// ==============================================================================
//
// Renders a protocol aggregate to Avro-protocol-shaped JSON (the `.avpr`
// layout: `protocol` / `namespace` / `doc` / `types` / `messages`). Key rules:
//
// - Primitives serialize as plain strings: "null", "int", "time-millis", ...
// - Named-type references serialize as bare name strings.
// - Unions serialize as JSON arrays: ["null", "string"].
// - Records and enums serialize as objects; error declarations use
//   `"type": "error"`.
// - A void response serializes as "null"; the method's verb annotation is
//   carried as an `http-verb` property on the message.
//
// Object key order is controlled (serde_json's `preserve_order` feature) and
// the renderer touches no ambient state, so output is byte-identical across
// invocations on equal aggregates.

use serde_json::{Map, Value};

use crate::model::declarations::{EnumDef, FieldDef};
use crate::model::field_type::FieldType;
use crate::model::method::MethodDef;
use crate::model::protocol::ProtoDef;
use crate::plugin::{GeneratedCode, PluginError, ProtoDefPlugin};

/// The built-in `.avpr`-style descriptor generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolJsonPlugin;

impl ProtoDefPlugin for ProtocolJsonPlugin {
    fn name(&self) -> &str {
        "protocol-json"
    }

    fn generate(&self, proto: &ProtoDef) -> Result<GeneratedCode, PluginError> {
        let json = protocol_to_json(proto);
        let mut contents = serde_json::to_string_pretty(&json)
            .expect("Value serialization is infallible");
        contents.push('\n');
        GeneratedCode::new(format!("{}.avpr", proto.name), contents).map_err(|source| {
            PluginError::InvalidOutput {
                plugin: self.name().to_string(),
                source,
            }
        })
    }
}

/// Serialize a protocol aggregate to a `serde_json::Value` in `.avpr` shape.
#[must_use]
pub fn protocol_to_json(proto: &ProtoDef) -> Value {
    let mut obj = Map::new();
    obj.insert("protocol".to_string(), Value::String(proto.name.clone()));
    if let Some(ns) = &proto.namespace {
        obj.insert("namespace".to_string(), Value::String(ns.clone()));
    }
    if let Some(doc) = &proto.doc {
        obj.insert("doc".to_string(), Value::String(doc.clone()));
    }

    let mut types = Vec::new();
    for record in &proto.records {
        types.push(named_to_json(
            "record",
            &record.name,
            record.namespace.as_deref(),
            record.doc.as_deref(),
            |obj| {
                obj.insert("fields".to_string(), fields_to_json(&record.fields));
            },
        ));
    }
    for e in &proto.enums {
        types.push(enum_to_json(e));
    }
    for error in &proto.errors {
        types.push(named_to_json(
            "error",
            &error.name,
            error.namespace.as_deref(),
            error.doc.as_deref(),
            |obj| {
                obj.insert("fields".to_string(), fields_to_json(&error.fields));
            },
        ));
    }
    obj.insert("types".to_string(), Value::Array(types));

    let mut messages = Map::new();
    for method in &proto.methods {
        messages.insert(method.name.clone(), method_to_json(method));
    }
    obj.insert("messages".to_string(), Value::Object(messages));

    Value::Object(obj)
}

/// Serialize one field type. Total over all five variants; recursion bottoms
/// out at primitives and references, since the model guarantees the tree is
/// acyclic.
#[must_use]
pub fn type_to_json(ty: &FieldType) -> Value {
    match ty {
        FieldType::Ref { name } => Value::String(name.clone()),
        FieldType::Primitive(kind) => Value::String(kind.as_str().to_string()),
        FieldType::Array { items } => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::String("array".to_string()));
            obj.insert("items".to_string(), type_to_json(items));
            Value::Object(obj)
        }
        FieldType::Map { values } => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::String("map".to_string()));
            obj.insert("values".to_string(), type_to_json(values));
            Value::Object(obj)
        }
        FieldType::Union { branches } => {
            Value::Array(branches.iter().map(type_to_json).collect())
        }
    }
}

/// Shared skeleton for record-shaped declarations: `type`, `name`,
/// `namespace`?, `doc`?, then whatever the caller appends.
fn named_to_json(
    type_tag: &str,
    name: &str,
    namespace: Option<&str>,
    doc: Option<&str>,
    extend: impl FnOnce(&mut Map<String, Value>),
) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(type_tag.to_string()));
    obj.insert("name".to_string(), Value::String(name.to_string()));
    if let Some(ns) = namespace {
        obj.insert("namespace".to_string(), Value::String(ns.to_string()));
    }
    if let Some(doc) = doc {
        obj.insert("doc".to_string(), Value::String(doc.to_string()));
    }
    extend(&mut obj);
    Value::Object(obj)
}

fn enum_to_json(e: &EnumDef) -> Value {
    named_to_json(
        "enum",
        &e.name,
        e.namespace.as_deref(),
        e.doc.as_deref(),
        |obj| {
            obj.insert(
                "symbols".to_string(),
                Value::Array(
                    e.symbols
                        .iter()
                        .map(|s| Value::String(s.clone()))
                        .collect(),
                ),
            );
        },
    )
}

fn fields_to_json(fields: &[FieldDef]) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|field| {
                let mut obj = Map::new();
                obj.insert("name".to_string(), Value::String(field.name.clone()));
                obj.insert("type".to_string(), type_to_json(&field.field_type));
                if let Some(doc) = &field.doc {
                    obj.insert("doc".to_string(), Value::String(doc.clone()));
                }
                Value::Object(obj)
            })
            .collect(),
    )
}

fn method_to_json(method: &MethodDef) -> Value {
    let mut obj = Map::new();
    if let Some(doc) = &method.doc {
        obj.insert("doc".to_string(), Value::String(doc.clone()));
    }
    obj.insert(
        "http-verb".to_string(),
        Value::String(method.http_verb.as_str().to_string()),
    );
    obj.insert(
        "request".to_string(),
        Value::Array(
            method
                .params
                .iter()
                .map(|param| {
                    let mut p = Map::new();
                    p.insert("name".to_string(), Value::String(param.name.clone()));
                    p.insert("type".to_string(), type_to_json(&param.param_type));
                    Value::Object(p)
                })
                .collect(),
        ),
    );
    let response = match method.return_type.as_field_type() {
        Some(ty) => type_to_json(ty),
        None => Value::String("null".to_string()),
    };
    obj.insert("response".to_string(), response);
    Value::Object(obj)
}
