//! pwtree: a filtered, deduplicated tree view of a Playwright test catalog.
//!
//! The pipeline is a sequence of pure transforms over a parsed
//! [`catalog::Catalog`]: zero or more filter passes ([`filters`]) prune the
//! tree, [`view::build_view`] merges duplicate spec records and computes the
//! headline totals, and [`render::render_tree`] turns the result into
//! terminal text. Everything around that (process spawning, config files,
//! terminal capabilities) lives at the edges.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod filters;
pub mod formatting;
pub mod io;
pub mod render;
pub mod view;

pub use crate::catalog::{Annotation, AnnotationKind, Catalog, Spec, SpecKey, Suite, TestInstance};
pub use crate::config::{AppConfig, DisplayOptions, Emojis, Theme};
pub use crate::filters::{
    filter_by_annotation, filter_by_project, filter_by_terms, AnnotationToggles, FilterTerms,
};
pub use crate::render::render_tree;
pub use crate::view::{build_view, TreeView};
