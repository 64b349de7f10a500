//! Recursive catalog filters.
//!
//! Each pass is a pure transform from a borrowed suite forest to a freshly
//! pruned one, so passes compose in any order the caller picks. Suites and
//! specs left with no surviving content are dropped; emptiness is the only
//! termination signal.

pub mod engine;
pub mod matcher;

pub use engine::{filter_by_annotation, filter_by_project, filter_by_terms};
pub use matcher::FilterTerms;

/// Which annotation kinds the caller asked to see. With none set, every test
/// instance is considered requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationToggles {
    pub skipped: bool,
    pub fixme: bool,
    pub fail: bool,
}

impl AnnotationToggles {
    pub fn any(&self) -> bool {
        self.skipped || self.fixme || self.fail
    }
}
