//! GraphQL introspection query execution and SDL rendering.
//!
//! This crate fetches a schema from a remote endpoint via introspection and
//! renders it as Schema Definition Language (SDL), either readable or
//! minified.
//!
//! # Examples
//!
//! ## One-step introspection to SDL
//!
//! ```no_run
//! use geq_introspect::introspect_url_to_sdl;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sdl = introspect_url_to_sdl("https://api.example.com/graphql").await?;
//!     println!("{}", sdl);
//!     Ok(())
//! }
//! ```
//!
//! ## Raw JSON with a custom header
//!
//! ```no_run
//! use geq_introspect::{
//!     introspection_to_minified_sdl, introspection_to_sdl, parse_introspection,
//!     IntrospectionClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IntrospectionClient::new().with_header_line("Authorization: Bearer my-token")?;
//!     let raw = client.execute_raw("https://api.example.com/graphql").await?;
//!
//!     let response = parse_introspection(&raw)?;
//!     println!("{}", introspection_to_sdl(&response));
//!     println!("{}", introspection_to_minified_sdl(&response));
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod json;
mod minify;
mod query;
mod sdl;
mod types;

pub use client::{parse_header, IntrospectionClient};
pub use error::{IntrospectionError, Result};
pub use json::{compact_json, pretty_json};
pub use minify::introspection_to_minified_sdl;
pub use query::{
    execute_introspection, graphql_error_messages, parse_introspection, INTROSPECTION_QUERY,
};
pub use sdl::introspection_to_sdl;
pub use types::*;

/// Introspects a GraphQL endpoint and converts the result to SDL.
///
/// This is a convenience function that combines [`execute_introspection`] and
/// [`introspection_to_sdl`] into a single call.
///
/// # Errors
///
/// Returns an error if:
/// - The network request fails
/// - The server returns an HTTP error
/// - The response cannot be parsed
///
/// # Examples
///
/// ```no_run
/// # use geq_introspect::introspect_url_to_sdl;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sdl = introspect_url_to_sdl("https://api.example.com/graphql").await?;
/// println!("{}", sdl);
/// # Ok(())
/// # }
/// ```
#[tracing::instrument]
pub async fn introspect_url_to_sdl(url: &str) -> Result<String> {
    tracing::info!("Starting introspection");
    let introspection = execute_introspection(url).await?;
    tracing::debug!("Converting introspection to SDL");
    let sdl = introspection_to_sdl(&introspection);
    tracing::info!(sdl_length = sdl.len(), "Introspection complete");
    Ok(sdl)
}
