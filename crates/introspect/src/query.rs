//! GraphQL introspection query text and response decoding.

use crate::{IntrospectionClient, IntrospectionError, IntrospectionResponse, Result};
use serde::Deserialize;

/// Standard GraphQL introspection query.
///
/// This query fetches the complete schema information including:
/// - Query, mutation, and subscription root types
/// - All type definitions with their fields and arguments
/// - Directive definitions
/// - Deprecation information
///
/// The query includes nested type references up to 7 levels deep to handle
/// complex type wrappers like `[[[String!]!]!]`. The renderer itself has no
/// such limit.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
";

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorMessage>,
}

#[derive(Deserialize)]
struct ErrorMessage {
    #[serde(default)]
    message: String,
}

/// Extracts `errors[].message` from a GraphQL response body, joined with `; `.
///
/// Returns `None` when the body has no such shape or no messages.
#[must_use]
pub fn graphql_error_messages(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = envelope
        .errors
        .into_iter()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .collect();
    (!messages.is_empty()).then(|| messages.join("; "))
}

/// Parses a raw introspection body into an [`IntrospectionResponse`].
///
/// A body without `data` that carries GraphQL `errors` is reported as
/// [`IntrospectionError::Graphql`]; anything else that fails to decode is
/// [`IntrospectionError::Parse`] with a snippet of the offending JSON.
pub fn parse_introspection(raw: &str) -> Result<IntrospectionResponse> {
    match serde_json::from_str::<IntrospectionResponse>(raw) {
        Ok(response) => {
            tracing::debug!(
                types = response.data.schema.types.len(),
                directives = response.data.schema.directives.len(),
                "Parsed introspection response"
            );
            Ok(response)
        }
        Err(e) => {
            if let Some(messages) = graphql_error_messages(raw) {
                return Err(IntrospectionError::Graphql(messages));
            }
            tracing::error!(error = %e, "Failed to parse introspection response");
            Err(IntrospectionError::parse(raw, &e))
        }
    }
}

/// Executes an introspection query against a GraphQL endpoint.
///
/// This is a shorthand for [`IntrospectionClient::execute`] with no extra
/// headers.
///
/// # Examples
///
/// ```no_run
/// # use geq_introspect::execute_introspection;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let response = execute_introspection("https://api.example.com/graphql").await?;
/// println!("Schema has {} types", response.data.schema.types.len());
/// # Ok(())
/// # }
/// ```
pub async fn execute_introspection(url: &str) -> Result<IntrospectionResponse> {
    IntrospectionClient::new().execute(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introspection_query_is_valid() {
        assert!(INTROSPECTION_QUERY.contains("IntrospectionQuery"));
        assert!(INTROSPECTION_QUERY.contains("__schema"));
        assert!(INTROSPECTION_QUERY.contains("fields(includeDeprecated: true)"));
        assert!(INTROSPECTION_QUERY.contains("directives"));
    }

    #[test]
    fn test_introspection_query_type_ref_depth() {
        let fragment = INTROSPECTION_QUERY
            .split("fragment TypeRef on __Type")
            .nth(1)
            .unwrap();
        assert_eq!(fragment.matches("ofType").count(), 7);
    }

    #[test]
    fn test_graphql_error_messages_joined() {
        let body = r#"{"errors":[{"message":"Unauthorized"},{"message":"Try again"}]}"#;
        assert_eq!(
            graphql_error_messages(body).as_deref(),
            Some("Unauthorized; Try again")
        );
    }

    #[test]
    fn test_graphql_error_messages_absent() {
        assert_eq!(graphql_error_messages("<html>502</html>"), None);
        assert_eq!(graphql_error_messages(r#"{"errors":[]}"#), None);
        assert_eq!(graphql_error_messages(r#"{"data":{}}"#), None);
    }

    #[test]
    fn test_parse_introspection_minimal() {
        let response = parse_introspection(
            r#"{"data":{"__schema":{"queryType":{"name":"Query"},"types":[],"directives":[]}}}"#,
        )
        .unwrap();
        assert_eq!(
            response.data.schema.query_type.map(|t| t.name).as_deref(),
            Some("Query")
        );
    }

    #[test]
    fn test_parse_introspection_reports_graphql_errors() {
        let err = parse_introspection(
            r#"{"data":null,"errors":[{"message":"Introspection is disabled"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, IntrospectionError::Graphql(ref m) if m == "Introspection is disabled"));
    }

    #[test]
    fn test_parse_introspection_invalid_json() {
        let err = parse_introspection("{\"data\": ").unwrap_err();
        assert!(matches!(err, IntrospectionError::Parse { .. }));
    }
}
