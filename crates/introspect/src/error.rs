use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

/// Number of characters of JSON shown on each side of a parse failure.
const SNIPPET_RADIUS: usize = 40;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Invalid header format: '{0}'. Expected 'Header-Name: Header-Value'")]
    InvalidHeader(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Server returned GraphQL errors: {0}")]
    Graphql(String),

    #[error("Failed to parse introspection response: {message} (near `{snippet}`)")]
    Parse { message: String, snippet: String },
}

impl IntrospectionError {
    /// Builds a [`IntrospectionError::Parse`] from a serde error, quoting the
    /// JSON around the reported line and column.
    pub(crate) fn parse(source: &str, error: &serde_json::Error) -> Self {
        Self::Parse {
            message: error.to_string(),
            snippet: snippet_at(source, error.line(), error.column()),
        }
    }
}

fn snippet_at(source: &str, line: usize, column: usize) -> String {
    let Some(text) = source.lines().nth(line.saturating_sub(1)) else {
        return source.chars().take(SNIPPET_RADIUS * 2).collect();
    };

    let chars: Vec<char> = text.chars().collect();
    let center = column.saturating_sub(1).min(chars.len());
    let start = center.saturating_sub(SNIPPET_RADIUS);
    let end = (center + SNIPPET_RADIUS).min(chars.len());
    chars[start..end].iter().collect::<String>().trim().to_string()
}
