//! SDL (Schema Definition Language) conversion from introspection responses.

use crate::types::{
    IntrospectionEnumValue, IntrospectionField, IntrospectionInputValue, IntrospectionResponse,
    IntrospectionSchema, IntrospectionType, IntrospectionTypeRefFull, TypeKind,
};
use std::collections::HashSet;

/// Built-in GraphQL scalar types that need no declaration.
pub(crate) const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID"];

/// Prefix reserved for introspection types and fields.
const RESERVED_PREFIX: &str = "__";

const TRIPLE_QUOTE: &str = "\"\"\"";
const ESCAPED_TRIPLE_QUOTE: &str = "\\\"\"\"";

/// One level of SDL indentation.
const INDENT: &str = "  ";

pub(crate) fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

/// Treats an absent and an empty string the same way.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Selects the types to render, in source order.
///
/// Introspection types, unnamed types and unknown kinds are dropped, and a
/// name is only ever returned once (the first occurrence wins). Built-in
/// scalars are dropped unless `keep_described_builtins` is set and the scalar
/// carries a description.
pub(crate) fn printable_types(
    schema: &IntrospectionSchema,
    keep_described_builtins: bool,
) -> Vec<&IntrospectionType> {
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut printable = Vec::with_capacity(schema.types.len());

    for type_def in &schema.types {
        let name = type_def.name.as_str();
        if name.is_empty() || is_reserved(name) || emitted.contains(name) {
            continue;
        }
        if matches!(
            type_def.kind,
            TypeKind::List | TypeKind::NonNull | TypeKind::Unknown
        ) {
            tracing::debug!(name, kind = ?type_def.kind, "Skipping type with unrenderable kind");
            continue;
        }
        if type_def.kind == TypeKind::Scalar && BUILTIN_SCALARS.contains(&name) {
            let described = non_empty(type_def.description.as_ref()).is_some();
            if !(keep_described_builtins && described) {
                continue;
            }
        }

        emitted.insert(name);
        printable.push(type_def);
    }

    printable
}

/// Resolved names of a list of type references, dropping any that resolve to
/// nothing.
pub(crate) fn type_names(refs: &[IntrospectionTypeRefFull]) -> Vec<String> {
    refs.iter()
        .map(IntrospectionTypeRefFull::to_type_string)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Converts a GraphQL introspection response to SDL (Schema Definition Language).
///
/// The output contains, in order:
/// - a `schema { … }` block naming every root operation type that is set
/// - every type in source order, except introspection types, duplicates and
///   undescribed built-in scalars
/// - every directive, built-in ones included
///
/// Descriptions become block strings and deprecations become `@deprecated`
/// directives. The result is trimmed and ends with exactly two newlines.
///
/// # Examples
///
/// ```no_run
/// # use geq_introspect::{execute_introspection, introspection_to_sdl};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let introspection = execute_introspection("https://api.example.com/graphql").await?;
/// let sdl = introspection_to_sdl(&introspection);
/// println!("{}", sdl);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[tracing::instrument(skip(introspection), fields(
    types = introspection.data.schema.types.len(),
    directives = introspection.data.schema.directives.len()
))]
pub fn introspection_to_sdl(introspection: &IntrospectionResponse) -> String {
    tracing::debug!("Converting introspection to SDL");
    let mut sdl = String::new();
    let schema = &introspection.data.schema;

    write_schema_definition(&mut sdl, schema);

    let mut types_written = 0;
    for type_def in printable_types(schema, true) {
        write_type(&mut sdl, type_def);
        sdl.push_str("\n\n");
        types_written += 1;
    }

    for directive in &schema.directives {
        write_description(&mut sdl, directive.description.as_ref(), "");
        sdl.push_str("directive @");
        sdl.push_str(&directive.name);
        write_arguments(&mut sdl, &directive.args, "");
        if directive.is_repeatable {
            sdl.push_str(" repeatable");
        }
        if !directive.locations.is_empty() {
            sdl.push_str(" on ");
            sdl.push_str(&directive.locations.join(" | "));
        }
        sdl.push_str("\n\n");
    }

    tracing::debug!(
        types_written,
        sdl_length = sdl.len(),
        "SDL generation complete"
    );
    format!("{}\n\n", sdl.trim())
}

fn write_schema_definition(sdl: &mut String, schema: &IntrospectionSchema) {
    let mut roots = schema.root_types().peekable();
    if roots.peek().is_none() {
        return;
    }

    sdl.push_str("schema {\n");
    for (operation, name) in roots {
        sdl.push_str(&format!("{INDENT}{operation}: {name}\n"));
    }
    sdl.push_str("}\n\n");
}

fn write_type(sdl: &mut String, type_def: &IntrospectionType) {
    write_description(sdl, type_def.description.as_ref(), "");

    match type_def.kind {
        TypeKind::Object => write_fields_type(sdl, "type", type_def),
        TypeKind::Interface => write_fields_type(sdl, "interface", type_def),
        TypeKind::InputObject => {
            sdl.push_str(&format!("input {} {{\n", type_def.name));
            for field in type_def.input_fields.iter().filter(|f| !is_reserved(&f.name)) {
                write_input_field(sdl, field);
            }
            sdl.push('}');
        }
        TypeKind::Enum => {
            sdl.push_str(&format!("enum {} {{\n", type_def.name));
            for value in type_def.enum_values.iter().filter(|v| !is_reserved(&v.name)) {
                write_enum_value(sdl, value);
            }
            sdl.push('}');
        }
        TypeKind::Union => {
            sdl.push_str("union ");
            sdl.push_str(&type_def.name);
            let members = type_names(&type_def.possible_types);
            if !members.is_empty() {
                sdl.push_str(" = ");
                sdl.push_str(&members.join(" | "));
            }
        }
        TypeKind::Scalar => {
            sdl.push_str("scalar ");
            sdl.push_str(&type_def.name);
        }
        TypeKind::List | TypeKind::NonNull | TypeKind::Unknown => {}
    }
}

/// Writes an object or interface definition.
fn write_fields_type(sdl: &mut String, keyword: &str, type_def: &IntrospectionType) {
    sdl.push_str(&format!("{keyword} {}", type_def.name));

    let interfaces = type_names(&type_def.interfaces);
    if !interfaces.is_empty() {
        sdl.push_str(" implements ");
        sdl.push_str(&interfaces.join(" & "));
    }

    sdl.push_str(" {\n");
    for field in type_def.fields.iter().filter(|f| !is_reserved(&f.name)) {
        write_field(sdl, field);
    }
    sdl.push('}');
}

fn write_field(sdl: &mut String, field: &IntrospectionField) {
    write_description(sdl, field.description.as_ref(), INDENT);
    sdl.push_str(INDENT);
    sdl.push_str(&field.name);
    write_arguments(sdl, &field.args, INDENT);
    sdl.push_str(": ");
    sdl.push_str(&field.type_ref.to_type_string());
    write_deprecation(sdl, field.is_deprecated, field.deprecation_reason.as_ref());
    sdl.push('\n');
}

fn write_input_field(sdl: &mut String, field: &IntrospectionInputValue) {
    write_description(sdl, field.description.as_ref(), INDENT);
    sdl.push_str(INDENT);
    write_input_value(sdl, field);
    sdl.push('\n');
}

fn write_enum_value(sdl: &mut String, value: &IntrospectionEnumValue) {
    write_description(sdl, value.description.as_ref(), INDENT);
    sdl.push_str(INDENT);
    sdl.push_str(&value.name);
    write_deprecation(sdl, value.is_deprecated, value.deprecation_reason.as_ref());
    sdl.push('\n');
}

/// `name: Type = default @deprecated(...)`, shared by arguments and input fields.
fn write_input_value(sdl: &mut String, value: &IntrospectionInputValue) {
    sdl.push_str(&value.name);
    sdl.push_str(": ");
    sdl.push_str(&value.type_ref.to_type_string());
    // Default literals are already in GraphQL syntax and are not re-escaped.
    if let Some(default) = non_empty(value.default_value.as_ref()) {
        sdl.push_str(" = ");
        sdl.push_str(default);
    }
    write_deprecation(sdl, value.is_deprecated, value.deprecation_reason.as_ref());
}

/// Writes a parenthesized argument list; writes nothing for no arguments.
///
/// If any argument has a description, every argument goes on its own line one
/// level below `base_indent`, and the closing parenthesis goes back at
/// `base_indent`. Otherwise the list stays on one line.
pub(crate) fn write_arguments(sdl: &mut String, args: &[IntrospectionInputValue], base_indent: &str) {
    if args.is_empty() {
        return;
    }

    let multiline = args
        .iter()
        .any(|arg| non_empty(arg.description.as_ref()).is_some());

    if multiline {
        let arg_indent = format!("{base_indent}{INDENT}");
        sdl.push_str("(\n");
        for arg in args {
            write_description(sdl, arg.description.as_ref(), &arg_indent);
            sdl.push_str(&arg_indent);
            write_input_value(sdl, arg);
            sdl.push('\n');
        }
        sdl.push_str(base_indent);
        sdl.push(')');
    } else {
        sdl.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                sdl.push_str(", ");
            }
            write_input_value(sdl, arg);
        }
        sdl.push(')');
    }
}

/// Writes a description as a block string at `indent`, one trimmed line at a
/// time. Nothing is written for an empty description.
pub(crate) fn write_description(sdl: &mut String, description: Option<&String>, indent: &str) {
    let Some(desc) = non_empty(description).map(str::trim) else {
        return;
    };
    if desc.is_empty() {
        return;
    }

    let escaped = desc.replace(TRIPLE_QUOTE, ESCAPED_TRIPLE_QUOTE);
    sdl.push_str(indent);
    sdl.push_str(TRIPLE_QUOTE);
    sdl.push('\n');
    for line in escaped.lines().map(str::trim) {
        if !line.is_empty() {
            sdl.push_str(indent);
            sdl.push_str(line);
        }
        sdl.push('\n');
    }
    sdl.push_str(indent);
    sdl.push_str(TRIPLE_QUOTE);
    sdl.push('\n');
}

/// Writes ` @deprecated`, with a reason argument when one is given.
pub(crate) fn write_deprecation(sdl: &mut String, is_deprecated: bool, reason: Option<&String>) {
    if !is_deprecated {
        return;
    }
    sdl.push_str(" @deprecated");
    if let Some(reason) = non_empty(reason) {
        sdl.push_str(&format!("(reason: \"{}\")", escape_string(reason)));
    }
}

/// Escapes a value for a single-line GraphQL string literal.
fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}
