//! Type definitions for GraphQL introspection responses.
//!
//! These types mirror the structure of GraphQL introspection query responses
//! and can be deserialized from JSON using serde. Decoding is lenient: `null`
//! strings, booleans and lists decode to their empty defaults, and an unknown
//! `kind` decodes to [`TypeKind::Unknown`] so that a partial document still
//! renders.

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes `null` (or a missing key, together with `#[serde(default)]`) as
/// `T::default()`.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Top-level introspection response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// Complete GraphQL schema information from introspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub query_type: Option<IntrospectionTypeRef>,
    #[serde(default)]
    pub mutation_type: Option<IntrospectionTypeRef>,
    #[serde(default)]
    pub subscription_type: Option<IntrospectionTypeRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub types: Vec<IntrospectionType>,
    #[serde(default, deserialize_with = "nullable")]
    pub directives: Vec<IntrospectionDirective>,
}

impl IntrospectionSchema {
    /// Root operation types as `(operation, type name)` pairs, skipping unset
    /// or unnamed roots.
    pub fn root_types(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("query", self.query_type.as_ref()),
            ("mutation", self.mutation_type.as_ref()),
            ("subscription", self.subscription_type.as_ref()),
        ]
        .into_iter()
        .filter_map(|(operation, root)| {
            root.map(|r| r.name.as_str())
                .filter(|name| !name.is_empty())
                .map(|name| (operation, name))
        })
    }
}

/// A bare `{ name }` reference as used for the schema root types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntrospectionTypeRef {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

/// A named type from the `types` array.
///
/// All kinds share one shape; which lists are populated depends on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionType {
    #[serde(default, deserialize_with = "nullable")]
    pub kind: TypeKind,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub fields: Vec<IntrospectionField>,
    #[serde(default, deserialize_with = "nullable")]
    pub input_fields: Vec<IntrospectionInputValue>,
    #[serde(default, deserialize_with = "nullable")]
    pub interfaces: Vec<IntrospectionTypeRefFull>,
    #[serde(default, deserialize_with = "nullable")]
    pub enum_values: Vec<IntrospectionEnumValue>,
    #[serde(default, deserialize_with = "nullable")]
    pub possible_types: Vec<IntrospectionTypeRefFull>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub type_ref: IntrospectionTypeRefFull,
    #[serde(default, deserialize_with = "nullable")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// An argument or input field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub type_ref: IntrospectionTypeRefFull,
    /// Literal default in GraphQL syntax, emitted verbatim.
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionDirective {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub args: Vec<IntrospectionInputValue>,
    /// Not requested by [`crate::INTROSPECTION_QUERY`], honored when present.
    #[serde(default, deserialize_with = "nullable")]
    pub is_repeatable: bool,
}

/// A possibly wrapped type reference (`kind`, `name`, `ofType` chain).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionTypeRefFull {
    #[serde(default, deserialize_with = "nullable")]
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<IntrospectionTypeRefFull>>,
}

/// A missing or `null` kind decodes as [`TypeKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    #[default]
    #[serde(other)]
    Unknown,
}

impl IntrospectionTypeRefFull {
    /// Creates a named (unwrapped) type reference.
    #[must_use]
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// Wraps `inner` in a `NON_NULL` reference.
    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Wraps `inner` in a `LIST` reference.
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Converts the type reference to a GraphQL type string.
    ///
    /// Handles type wrappers like `NonNull` and `List` to generate strings like:
    /// - `String` for a simple scalar
    /// - `String!` for a non-null scalar
    /// - `[String]` for a list
    /// - `[String!]!` for a non-null list of non-null strings
    ///
    /// There is no nesting limit. A reference whose name is missing but which
    /// still has an `ofType` resolves through to the inner reference.
    ///
    /// # Examples
    ///
    /// ```
    /// # use geq_introspect::{IntrospectionTypeRefFull, TypeKind};
    /// let type_ref = IntrospectionTypeRefFull::non_null(IntrospectionTypeRefFull::list(
    ///     IntrospectionTypeRefFull::non_null(IntrospectionTypeRefFull::named(
    ///         TypeKind::Scalar,
    ///         "String",
    ///     )),
    /// ));
    /// assert_eq!(type_ref.to_type_string(), "[String!]!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match (self.kind, self.of_type.as_deref()) {
            (TypeKind::NonNull, Some(of_type)) => format!("{}!", of_type.to_type_string()),
            (TypeKind::List, Some(of_type)) => format!("[{}]", of_type.to_type_string()),
            (_, of_type) => match self.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => of_type.map(Self::to_type_string).unwrap_or_default(),
            },
        }
    }
}

impl std::fmt::Display for IntrospectionTypeRefFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_type_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string() -> IntrospectionTypeRefFull {
        IntrospectionTypeRefFull::named(TypeKind::Scalar, "String")
    }

    #[test]
    fn test_type_ref_to_string() {
        assert_eq!(string().to_type_string(), "String");
        assert_eq!(
            IntrospectionTypeRefFull::non_null(string()).to_type_string(),
            "String!"
        );
        assert_eq!(
            IntrospectionTypeRefFull::list(string()).to_type_string(),
            "[String]"
        );
        assert_eq!(
            IntrospectionTypeRefFull::non_null(IntrospectionTypeRefFull::list(string()))
                .to_type_string(),
            "[String]!"
        );
        assert_eq!(
            IntrospectionTypeRefFull::list(IntrospectionTypeRefFull::non_null(string()))
                .to_type_string(),
            "[String!]"
        );
    }

    #[test]
    fn test_type_ref_deeper_than_query_fragment() {
        let mut type_ref = string();
        for _ in 0..6 {
            type_ref = IntrospectionTypeRefFull::non_null(IntrospectionTypeRefFull::list(type_ref));
        }
        let expected = format!("{}String{}", "[".repeat(6), "]!".repeat(6));
        assert_eq!(type_ref.to_type_string(), expected);
    }

    #[test]
    fn test_type_ref_missing_name_falls_through() {
        let type_ref = IntrospectionTypeRefFull {
            kind: TypeKind::Object,
            name: Some(String::new()),
            of_type: Some(Box::new(IntrospectionTypeRefFull::named(
                TypeKind::Object,
                "User",
            ))),
        };
        assert_eq!(type_ref.to_type_string(), "User");
    }

    #[test]
    fn test_type_ref_wrapper_without_inner_is_empty() {
        let type_ref = IntrospectionTypeRefFull {
            kind: TypeKind::NonNull,
            name: None,
            of_type: None,
        };
        assert_eq!(type_ref.to_type_string(), "");
    }

    #[test]
    fn test_display_matches_type_string() {
        let type_ref = IntrospectionTypeRefFull::non_null(string());
        assert_eq!(type_ref.to_string(), "String!");
    }

    #[test]
    fn test_deserialize_nulls_and_unknown_kind() {
        let json = r#"{
            "kind": "SOMETHING_NEW",
            "name": "Odd",
            "description": null,
            "fields": null,
            "inputFields": null,
            "interfaces": null,
            "enumValues": null,
            "possibleTypes": null
        }"#;
        let parsed: IntrospectionType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, TypeKind::Unknown);
        assert_eq!(parsed.name, "Odd");
        assert!(parsed.fields.is_empty());
        assert!(parsed.possible_types.is_empty());
    }

    #[test]
    fn test_deserialize_missing_and_null_kinds() {
        let field: IntrospectionField =
            serde_json::from_str(r#"{"name": "title", "args": [], "type": {"name": "String"}}"#)
                .unwrap();
        assert_eq!(field.type_ref.kind, TypeKind::Unknown);
        assert_eq!(field.type_ref.to_type_string(), "String");

        let arg: IntrospectionInputValue =
            serde_json::from_str(r#"{"name": "id", "type": null}"#).unwrap();
        assert_eq!(arg.type_ref.to_type_string(), "");

        let nested: IntrospectionTypeRefFull = serde_json::from_str(
            r#"{"kind": "NON_NULL", "name": null, "ofType": {"kind": null, "name": "ID"}}"#,
        )
        .unwrap();
        assert_eq!(nested.to_type_string(), "ID!");

        let type_def: IntrospectionType =
            serde_json::from_str(r#"{"kind": null, "name": "Odd"}"#).unwrap();
        assert_eq!(type_def.kind, TypeKind::Unknown);
    }

    #[test]
    fn test_null_kind_keeps_rest_of_document() {
        let response = crate::parse_introspection(
            r#"{"data":{"__schema":{"types":[
                {"kind":null,"name":"Odd"},
                {"kind":"SCALAR","name":"Money"}
            ],"directives":[]}}}"#,
        )
        .unwrap();
        assert_eq!(crate::introspection_to_sdl(&response), "scalar Money\n\n");
    }

    #[test]
    fn test_root_types_skips_missing_roots() {
        let schema: IntrospectionSchema = serde_json::from_str(
            r#"{
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": { "name": "" },
                "types": [],
                "directives": []
            }"#,
        )
        .unwrap();
        let roots: Vec<_> = schema.root_types().collect();
        assert_eq!(roots, vec![("query", "Query")]);
    }
}
