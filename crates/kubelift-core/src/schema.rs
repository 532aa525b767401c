//! Resource schema model
//!
//! The cluster's introspection endpoint returns a single JSON document with a
//! flat `definitions` dictionary of schema nodes keyed by fully-qualified type
//! id (e.g. `io.k8s.api.apps.v1.Deployment`). Nodes reference each other via
//! `$ref`, so the dictionary forms a directed graph that may contain cycles
//! through shared definitions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::{LiftError, LiftResult};

const REF_PREFIX: &str = "#/definitions/";

/// A single property of a schema node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Scalar/array/object type name; absent for pure references
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Reference to another definition (`#/definitions/<id>`)
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Item spec for array properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<FieldSpec>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    /// Definition id this field points at, directly or through array items
    pub fn referenced_id(&self) -> Option<&str> {
        let raw = self
            .reference
            .as_deref()
            .or_else(|| self.items.as_ref().and_then(|i| i.reference.as_deref()))?;
        Some(raw.strip_prefix(REF_PREFIX).unwrap_or(raw))
    }
}

/// A schema node: description plus named properties
///
/// Properties are kept in a sorted map so that field explanations come out in
/// a stable order regardless of the discovery document's key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, FieldSpec>,
}

/// The full definitions dictionary from a cluster's introspection endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDefinitions {
    #[serde(default)]
    pub definitions: BTreeMap<String, ResourceSchema>,
}

impl SchemaDefinitions {
    /// Parse a discovery document (`{ "definitions": { ... } }`)
    pub fn from_json(text: &str) -> LiftResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            LiftError::parse_at(
                format!("invalid discovery document: {}", e),
                Some(e.line()),
                Some(e.column()),
            )
        })
    }

    pub fn get(&self, id: &str) -> Option<&ResourceSchema> {
        self.definitions.get(id)
    }

    /// Look up a schema by resource kind.
    ///
    /// `kind` must be in the cluster's canonical casing for type names
    /// (`"Deployment"`, not `"deployment"`); no normalization is performed.
    ///
    /// Candidates are keys equal to `kind` or ending in `".<kind>"`. When
    /// several definitions share the kind suffix (the same kind published
    /// under multiple API groups), the shortest qualified key wins, with ties
    /// broken lexicographically. An exact-match key is the shortest possible
    /// candidate, so it always wins.
    pub fn find(&self, kind: &str) -> LiftResult<(&str, &ResourceSchema)> {
        if kind.is_empty() {
            return Err(LiftError::validation("resource kind must not be empty"));
        }

        let suffix = format!(".{}", kind);
        let mut best: Option<&String> = None;

        for key in self.definitions.keys() {
            if key.as_str() != kind && !key.ends_with(&suffix) {
                continue;
            }
            best = match best {
                None => Some(key),
                Some(current)
                    if key.len() < current.len()
                        || (key.len() == current.len() && key.as_str() < current.as_str()) =>
                {
                    Some(key)
                }
                other => other,
            };
        }

        let id = best.ok_or_else(|| {
            LiftError::not_found(format!("no schema definition for kind '{}'", kind))
        })?;
        Ok((id.as_str(), &self.definitions[id.as_str()]))
    }

    /// Produce an indented field tree for a schema.
    ///
    /// One line per property, `name: type` with `type` defaulting to
    /// `"object"`. Direct references and array-item references are expanded
    /// recursively at indent+2. A definition shared by sibling branches is
    /// expanded under each of them; a reference back to a definition already
    /// open on the current branch truncates, which bounds the walk on cyclic
    /// graphs.
    pub fn explain(&self, schema: &ResourceSchema) -> String {
        let mut out = String::new();
        let mut open = HashSet::new();
        self.walk(schema, 0, &mut open, &mut out);
        out
    }

    /// Convenience: look up a kind and explain it in one step
    pub fn explain_kind(&self, kind: &str) -> LiftResult<(String, String)> {
        let (id, schema) = self.find(kind)?;
        Ok((id.to_string(), self.explain(schema)))
    }

    /// `open` holds the definitions currently being expanded on this branch
    fn walk(
        &self,
        schema: &ResourceSchema,
        indent: usize,
        open: &mut HashSet<String>,
        out: &mut String,
    ) {
        for (name, field) in &schema.properties {
            let type_name = field.type_name.as_deref().unwrap_or("object");
            out.push_str(&" ".repeat(indent));
            out.push_str(name);
            out.push_str(": ");
            out.push_str(type_name);
            out.push('\n');

            if let Some(id) = field.referenced_id() {
                if open.insert(id.to_string()) {
                    if let Some(target) = self.get(id) {
                        self.walk(target, indent + 2, open, out);
                    }
                    open.remove(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defs(value: serde_json::Value) -> SchemaDefinitions {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_find_prefers_shortest_qualified_name() {
        let defs = defs(json!({
            "definitions": {
                "io.k8s.api.extensions.v1beta1.Deployment": {"description": "legacy"},
                "io.k8s.api.apps.v1.Deployment": {"description": "current"}
            }
        }));

        let (id, schema) = defs.find("Deployment").unwrap();
        assert_eq!(id, "io.k8s.api.apps.v1.Deployment");
        assert_eq!(schema.description.as_deref(), Some("current"));
    }

    #[test]
    fn test_find_exact_match_wins() {
        let defs = defs(json!({
            "definitions": {
                "Deployment": {"description": "bare"},
                "io.k8s.api.apps.v1.Deployment": {"description": "qualified"}
            }
        }));

        let (id, _) = defs.find("Deployment").unwrap();
        assert_eq!(id, "Deployment");
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let defs = defs(json!({
            "definitions": {
                "io.k8s.api.apps.v1.Deployment": {}
            }
        }));

        assert!(matches!(
            defs.find("deployment"),
            Err(LiftError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_does_not_match_partial_segment() {
        let defs = defs(json!({
            "definitions": {
                "io.k8s.api.apps.v1.StatefulSet": {}
            }
        }));

        // "Set" is a substring of the last segment, not a full segment
        assert!(defs.find("Set").is_err());
    }

    #[test]
    fn test_find_unknown_kind() {
        let defs = SchemaDefinitions::default();
        let err = defs.find("Widget").unwrap_err();
        assert!(err.to_string().contains("Widget"));
    }

    #[test]
    fn test_explain_defaults_to_object() {
        let defs = defs(json!({
            "definitions": {
                "v1.Thing": {
                    "properties": {
                        "metadata": {},
                        "replicas": {"type": "integer"}
                    }
                }
            }
        }));

        let (_, schema) = defs.find("Thing").unwrap();
        let text = defs.explain(schema);
        assert_eq!(text, "metadata: object\nreplicas: integer\n");
    }

    #[test]
    fn test_explain_expands_references() {
        let defs = defs(json!({
            "definitions": {
                "v1.Outer": {
                    "properties": {
                        "spec": {"$ref": "#/definitions/v1.Inner"}
                    }
                },
                "v1.Inner": {
                    "properties": {
                        "image": {"type": "string"}
                    }
                }
            }
        }));

        let (_, schema) = defs.find("Outer").unwrap();
        let text = defs.explain(schema);
        assert_eq!(text, "spec: object\n  image: string\n");
    }

    #[test]
    fn test_explain_expands_array_item_references() {
        let defs = defs(json!({
            "definitions": {
                "v1.PodSpec": {
                    "properties": {
                        "containers": {
                            "type": "array",
                            "items": {"$ref": "#/definitions/v1.Container"}
                        }
                    }
                },
                "v1.Container": {
                    "properties": {
                        "name": {"type": "string"}
                    }
                }
            }
        }));

        let (_, schema) = defs.find("PodSpec").unwrap();
        let text = defs.explain(schema);
        assert_eq!(text, "containers: array\n  name: string\n");
    }

    #[test]
    fn test_explain_terminates_on_reference_cycle() {
        // A references B, B references A; the walk must still terminate
        let defs = defs(json!({
            "definitions": {
                "v1.A": {
                    "properties": {
                        "b": {"$ref": "#/definitions/v1.B"}
                    }
                },
                "v1.B": {
                    "properties": {
                        "a": {"$ref": "#/definitions/v1.A"}
                    }
                }
            }
        }));

        let (_, schema) = defs.find("A").unwrap();
        let text = defs.explain(schema);
        // The back-reference to A truncates one level below B
        assert_eq!(text, "b: object\n  a: object\n    b: object\n");
    }

    #[test]
    fn test_explain_expands_shared_reference_under_each_branch() {
        // Meta is referenced from two sibling fields; both get the full tree
        let defs = defs(json!({
            "definitions": {
                "v1.Pair": {
                    "properties": {
                        "first": {"$ref": "#/definitions/v1.Meta"},
                        "second": {"$ref": "#/definitions/v1.Meta"}
                    }
                },
                "v1.Meta": {
                    "properties": {
                        "name": {"type": "string"}
                    }
                }
            }
        }));

        let (_, schema) = defs.find("Pair").unwrap();
        let text = defs.explain(schema);
        assert_eq!(
            text,
            "first: object\n  name: string\nsecond: object\n  name: string\n"
        );
    }

    #[test]
    fn test_explain_self_referential_definition() {
        let defs = defs(json!({
            "definitions": {
                "v1.JSONSchemaProps": {
                    "properties": {
                        "not": {"$ref": "#/definitions/v1.JSONSchemaProps"},
                        "type": {"type": "string"}
                    }
                }
            }
        }));

        let (id, schema) = defs.find("JSONSchemaProps").unwrap();
        assert_eq!(id, "v1.JSONSchemaProps");
        let text = defs.explain(schema);
        // The self-reference expands once, then truncates
        assert_eq!(text, "not: object\n  not: object\n  type: string\ntype: string\n");
    }

    #[test]
    fn test_from_json_reports_location() {
        let err = SchemaDefinitions::from_json("{\"definitions\": nonsense}").unwrap_err();
        match err {
            LiftError::Parse { line, .. } => assert!(line.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
