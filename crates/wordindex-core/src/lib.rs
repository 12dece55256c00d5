//! Shared types for the wordindex tools.
//!
//! - [`character`] -- token delimiters, markup characters and case folding
//! - [`index`] -- the `word -> {document -> count}` result table

pub mod character;
pub mod index;
