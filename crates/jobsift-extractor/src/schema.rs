//! JSON Schema for structured extraction
//!
//! Generated from the domain types with `schemars`. Structured-output APIs
//! accept only a subset of JSON Schema, so the generated document is
//! flattened: `$ref`s are inlined, single-element `allOf` wrappers are
//! unwrapped, documented unit enums (`oneOf` of single-value enums) become a
//! plain string enum, and `definitions`, `$schema` and integer/number
//! `format` hints are removed.

use jobsift_domain::{AnalysisVariant, ComplexAnalysis, SimpleAnalysis};
use schemars::schema_for;
use serde_json::Value;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Extraction schema for `variant`
pub fn extraction_schema(variant: AnalysisVariant) -> Value {
    let schema = match variant {
        AnalysisVariant::Simple => schema_for!(SimpleAnalysis),
        AnalysisVariant::Complex => schema_for!(ComplexAnalysis),
    };
    let mut value = serde_json::to_value(schema).unwrap_or_default();

    let definitions = match &value {
        Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };
    if let Some(defs) = definitions {
        inline_refs(&mut value, &defs);
    }

    if let Value::Object(map) = &mut value {
        map.remove("definitions");
        map.remove("$schema");
    }
    strip_unsupported(&mut value);

    value
}

fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get("$ref").cloned() {
                if let Some(def) = path
                    .strip_prefix(DEFINITIONS_PREFIX)
                    .and_then(|name| definitions.get(name))
                {
                    let mut inlined = def.clone();
                    // keep siblings such as "description" next to the ref
                    if let Value::Object(target) = &mut inlined {
                        for (key, sibling) in map.iter() {
                            if key != "$ref" {
                                target.entry(key.clone()).or_insert_with(|| sibling.clone());
                            }
                        }
                    }
                    *value = inlined;
                    inline_refs(value, definitions);
                    return;
                }
            }

            for (_, nested) in map.iter_mut() {
                inline_refs(nested, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

fn strip_unsupported(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(all_of)) = map.get("allOf") {
                if all_of.len() == 1 {
                    if let Some(Value::Object(inner)) = all_of.first().cloned() {
                        map.remove("allOf");
                        for (key, v) in inner {
                            map.entry(key).or_insert(v);
                        }
                    }
                }
            }

            if let Some(values) = map.get("oneOf").and_then(string_enum_values) {
                map.remove("oneOf");
                map.insert("type".to_string(), Value::String("string".to_string()));
                map.insert("enum".to_string(), Value::Array(values));
            }

            let numeric_format = matches!(
                map.get("format").and_then(Value::as_str),
                Some("uint" | "uint8" | "uint16" | "uint32" | "uint64" | "int32" | "int64" | "float" | "double")
            );
            if numeric_format {
                map.remove("format");
            }

            for (_, nested) in map.iter_mut() {
                strip_unsupported(nested);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                strip_unsupported(item);
            }
        }
        _ => {}
    }
}

/// Values of a `oneOf` whose branches are all single-value string enums
fn string_enum_values(one_of: &Value) -> Option<Vec<Value>> {
    let branches = one_of.as_array()?;
    let mut values = Vec::with_capacity(branches.len());
    for branch in branches {
        match branch.get("enum").and_then(Value::as_array) {
            Some(single) if single.len() == 1 && single[0].is_string() => {
                values.push(single[0].clone())
            }
            _ => return None,
        }
    }
    (!values.is_empty()).then_some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_key(value: &Value, key: &str) -> bool {
        match value {
            Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
            Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
            _ => false,
        }
    }

    #[test]
    fn test_simple_schema_lists_fields() {
        let schema = extraction_schema(AnalysisVariant::Simple);
        let properties = schema["properties"].as_object().unwrap();
        for field in AnalysisVariant::Simple.field_names() {
            assert!(properties.contains_key(*field), "missing {}", field);
        }
        assert!(!properties.contains_key("domain_knowledge"));
    }

    #[test]
    fn test_complex_schema_is_self_contained() {
        let schema = extraction_schema(AnalysisVariant::Complex);
        assert!(!contains_key(&schema, "$ref"));
        assert!(!contains_key(&schema, "definitions"));
        assert!(!contains_key(&schema, "$schema"));

        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("salary"));
        assert!(properties.contains_key("languages"));
    }

    #[test]
    fn test_enum_values_are_canonical() {
        let schema = extraction_schema(AnalysisVariant::Simple);
        let rendered = schema.to_string();
        assert!(rendered.contains("\"On-site\""));
        assert!(rendered.contains("\"Lead\""));
    }

    #[test]
    fn test_numeric_formats_removed() {
        let schema = extraction_schema(AnalysisVariant::Complex);
        assert!(!schema.to_string().contains("uint32"));
    }

    #[test]
    fn test_documented_enum_collapses() {
        let mut value = serde_json::json!({
            "oneOf": [
                {"type": "string", "enum": ["Remote"], "description": "Fully remote"},
                {"type": "string", "enum": ["On-site"], "description": "Office based"}
            ]
        });
        strip_unsupported(&mut value);
        assert_eq!(value["type"], "string");
        assert_eq!(value["enum"], serde_json::json!(["Remote", "On-site"]));
        assert!(value.get("oneOf").is_none());
    }

    #[test]
    fn test_complex_schema_has_no_one_of() {
        let schema = extraction_schema(AnalysisVariant::Complex);
        assert!(!contains_key(&schema, "oneOf"));
    }

    #[test]
    fn test_single_all_of_is_unwrapped() {
        let mut value = serde_json::json!({
            "allOf": [{"type": "string", "enum": ["a"]}],
            "description": "d"
        });
        strip_unsupported(&mut value);
        assert_eq!(value["type"], "string");
        assert_eq!(value["description"], "d");
        assert!(value.get("allOf").is_none());
    }
}
