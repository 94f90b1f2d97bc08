//! Minified SDL: the same definitions without descriptions, deprecation
//! markers or layout whitespace.

use crate::sdl::{is_reserved, non_empty, printable_types, type_names};
use crate::types::{
    IntrospectionField, IntrospectionInputValue, IntrospectionResponse, IntrospectionType,
    TypeKind,
};

/// Minified output never marks deprecation, so it does not declare the
/// directive either.
const DEPRECATED_DIRECTIVE: &str = "deprecated";

/// Converts an introspection response to minified SDL.
///
/// Definitions appear in the same order as in [`crate::introspection_to_sdl`]
/// and are separated by single spaces. Built-in scalars are always omitted.
/// Descriptions and `@deprecated` markers are dropped (together with the
/// `@deprecated` declaration), so the result cannot express deprecation.
/// Default values pass through verbatim, so a string default such as
/// `"#fff"` keeps its characters inside the literal.
///
/// ```
/// # use geq_introspect::{introspection_to_minified_sdl, parse_introspection};
/// let response = parse_introspection(
///     r#"{"data":{"__schema":{"queryType":{"name":"Query"},"types":[
///         {"kind":"OBJECT","name":"Query","fields":[
///             {"name":"hello","args":[],"type":{"kind":"SCALAR","name":"String"}}
///         ]}
///     ],"directives":[]}}}"#,
/// )?;
/// assert_eq!(
///     introspection_to_minified_sdl(&response),
///     "schema{query:Query} type Query{hello:String}\n"
/// );
/// # Ok::<(), geq_introspect::IntrospectionError>(())
/// ```
#[must_use]
#[tracing::instrument(skip(introspection), fields(
    types = introspection.data.schema.types.len(),
    directives = introspection.data.schema.directives.len()
))]
pub fn introspection_to_minified_sdl(introspection: &IntrospectionResponse) -> String {
    tracing::debug!("Converting introspection to minified SDL");
    let schema = &introspection.data.schema;
    let mut definitions: Vec<String> = Vec::new();

    let roots: Vec<String> = schema
        .root_types()
        .map(|(operation, name)| format!("{operation}:{name}"))
        .collect();
    if !roots.is_empty() {
        definitions.push(format!("schema{{{}}}", roots.join(" ")));
    }

    definitions.extend(printable_types(schema, false).into_iter().map(minify_type));

    for directive in schema
        .directives
        .iter()
        .filter(|d| d.name != DEPRECATED_DIRECTIVE)
    {
        let mut definition = format!("directive @{}", directive.name);
        definition.push_str(&minify_arguments(&directive.args));
        if directive.is_repeatable {
            definition.push_str(" repeatable");
        }
        if !directive.locations.is_empty() {
            definition.push_str(" on ");
            definition.push_str(&directive.locations.join("|"));
        }
        definitions.push(definition);
    }

    let mut sdl = definitions.join(" ");
    sdl.push('\n');
    tracing::debug!(sdl_length = sdl.len(), "Minified SDL generation complete");
    sdl
}

fn minify_type(type_def: &IntrospectionType) -> String {
    let name = &type_def.name;
    match type_def.kind {
        TypeKind::Object => minify_fields_type("type", type_def),
        TypeKind::Interface => minify_fields_type("interface", type_def),
        TypeKind::InputObject => {
            let fields: Vec<String> = type_def
                .input_fields
                .iter()
                .filter(|f| !is_reserved(&f.name))
                .map(minify_input_value)
                .collect();
            format!("input {name}{{{}}}", fields.join(" "))
        }
        TypeKind::Enum => {
            let values: Vec<&str> = type_def
                .enum_values
                .iter()
                .map(|v| v.name.as_str())
                .filter(|v| !is_reserved(v))
                .collect();
            format!("enum {name}{{{}}}", values.join(" "))
        }
        TypeKind::Union => {
            let members = type_names(&type_def.possible_types);
            if members.is_empty() {
                format!("union {name}")
            } else {
                format!("union {name}={}", members.join("|"))
            }
        }
        TypeKind::Scalar | TypeKind::List | TypeKind::NonNull | TypeKind::Unknown => {
            format!("scalar {name}")
        }
    }
}

fn minify_fields_type(keyword: &str, type_def: &IntrospectionType) -> String {
    let mut definition = format!("{keyword} {}", type_def.name);

    let interfaces = type_names(&type_def.interfaces);
    if !interfaces.is_empty() {
        definition.push_str(" implements ");
        definition.push_str(&interfaces.join("&"));
    }

    let fields: Vec<String> = type_def
        .fields
        .iter()
        .filter(|f| !is_reserved(&f.name))
        .map(minify_field)
        .collect();
    definition.push('{');
    definition.push_str(&fields.join(" "));
    definition.push('}');
    definition
}

fn minify_field(field: &IntrospectionField) -> String {
    format!(
        "{}{}:{}",
        field.name,
        minify_arguments(&field.args),
        field.type_ref.to_type_string()
    )
}

fn minify_input_value(value: &IntrospectionInputValue) -> String {
    let mut minified = format!("{}:{}", value.name, value.type_ref.to_type_string());
    if let Some(default) = non_empty(value.default_value.as_ref()) {
        minified.push('=');
        minified.push_str(default);
    }
    minified
}

/// Comma-separated argument list without spaces; empty for no arguments.
fn minify_arguments(args: &[IntrospectionInputValue]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let args: Vec<String> = args.iter().map(minify_input_value).collect();
    format!("({})", args.join(","))
}
