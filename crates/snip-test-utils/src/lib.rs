//! Shared test utilities for the snippet-collector workspace.
//!
//! - [`workspace`]: [`TestWorkspace`] temporary run root with source and
//!   config helpers
//! - [`css`]: builders for style sheets containing delimited blocks

pub mod css;
pub mod workspace;

pub use workspace::TestWorkspace;
