//! Turning a raw introspection body into the files to write.

use geq_introspect::{
    compact_json, introspection_to_minified_sdl, introspection_to_sdl, parse_introspection,
    pretty_json,
};
use std::path::{Path, PathBuf};

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    /// SDL (Schema Definition Language) format
    #[default]
    Sdl,
    /// JSON introspection format
    Json,
}

impl SchemaFormat {
    /// Default file name for the main or the minified output.
    #[must_use]
    pub const fn default_file_name(self, minified: bool) -> &'static str {
        match (self, minified) {
            (Self::Sdl, false) => "schema.graphql",
            (Self::Sdl, true) => "schema.min.graphql",
            (Self::Json, false) => "schema.json",
            (Self::Json, true) => "schema.min.json",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sdl => "SDL",
            Self::Json => "JSON",
        }
    }
}

/// A rendered schema and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOutput {
    pub path: PathBuf,
    pub contents: String,
    pub minified: bool,
}

/// Renders the main output and, with `minify`, the minified one.
///
/// The main output goes to `output` when given. The minified output always
/// uses its default file name.
pub fn render_outputs(
    raw: &str,
    format: SchemaFormat,
    output: Option<&Path>,
    minify: bool,
) -> geq_introspect::Result<Vec<SchemaOutput>> {
    let main_path = output.map_or_else(
        || PathBuf::from(format.default_file_name(false)),
        Path::to_path_buf,
    );

    let (main, minified) = match format {
        SchemaFormat::Sdl => {
            let response = parse_introspection(raw)?;
            let main = introspection_to_sdl(&response);
            let minified = minify.then(|| introspection_to_minified_sdl(&response));
            (main, minified)
        }
        SchemaFormat::Json => {
            let main = pretty_json(raw)?;
            let minified = if minify { Some(compact_json(raw)?) } else { None };
            (main, minified)
        }
    };

    let mut outputs = vec![SchemaOutput {
        path: main_path,
        contents: main,
        minified: false,
    }];
    if let Some(contents) = minified {
        outputs.push(SchemaOutput {
            path: PathBuf::from(format.default_file_name(true)),
            contents,
            minified: true,
        });
    }

    tracing::debug!(files = outputs.len(), format = format.label(), "Rendered schema outputs");
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geq_introspect::IntrospectionError;

    const RAW: &str = r#"{"data":{"__schema":{"queryType":{"name":"Query"},"types":[
        {"kind":"OBJECT","name":"Query","description":"Entry point","fields":[
            {"name":"hello","args":[],"type":{"kind":"SCALAR","name":"String"}}
        ]},
        {"kind":"SCALAR","name":"String"}
    ],"directives":[]}}}"#;

    #[test]
    fn test_default_file_names() {
        assert_eq!(SchemaFormat::Sdl.default_file_name(false), "schema.graphql");
        assert_eq!(SchemaFormat::Sdl.default_file_name(true), "schema.min.graphql");
        assert_eq!(SchemaFormat::Json.default_file_name(false), "schema.json");
        assert_eq!(SchemaFormat::Json.default_file_name(true), "schema.min.json");
    }

    #[test]
    fn test_sdl_without_minify() {
        let outputs = render_outputs(RAW, SchemaFormat::Sdl, None, false).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].path, PathBuf::from("schema.graphql"));
        assert_eq!(
            outputs[0].contents,
            "schema {\n  query: Query\n}\n\n\"\"\"\nEntry point\n\"\"\"\ntype Query {\n  hello: String\n}\n\n"
        );
    }

    #[test]
    fn test_sdl_with_minify_and_custom_path() {
        let outputs =
            render_outputs(RAW, SchemaFormat::Sdl, Some(Path::new("out/api.graphql")), true)
                .unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].path, PathBuf::from("out/api.graphql"));
        assert!(!outputs[0].minified);
        assert_eq!(outputs[1].path, PathBuf::from("schema.min.graphql"));
        assert!(outputs[1].minified);
        assert_eq!(
            outputs[1].contents,
            "schema{query:Query} type Query{hello:String}\n"
        );
    }

    #[test]
    fn test_json_with_minify() {
        let outputs = render_outputs(RAW, SchemaFormat::Json, None, true).unwrap();
        assert_eq!(outputs[0].path, PathBuf::from("schema.json"));
        assert!(outputs[0].contents.starts_with("{\n  \"data\": {"));
        assert_eq!(outputs[1].path, PathBuf::from("schema.min.json"));
        assert!(!outputs[1].contents.contains('\n'));
    }

    #[test]
    fn test_json_output_does_not_require_introspection_shape() {
        let outputs = render_outputs(r#"{"hello": "world"}"#, SchemaFormat::Json, None, false)
            .unwrap();
        assert_eq!(outputs[0].contents, "{\n  \"hello\": \"world\"\n}");
    }

    #[test]
    fn test_invalid_introspection_is_parse_error() {
        let err = render_outputs(r#"{"data": 1}"#, SchemaFormat::Sdl, None, false).unwrap_err();
        assert!(matches!(err, IntrospectionError::Parse { .. }));
    }
}
