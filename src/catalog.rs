//! Typed model of the Playwright test listing.
//!
//! Mirrors the shape of `npx playwright test --list --reporter=json`: an
//! ordered forest of suites (conventionally one per source file), each
//! carrying nested suites and specs, each spec carrying one test instance per
//! execution project. Fields the tree view does not consume (status, column,
//! ids, ...) are ignored during deserialization rather than modeled as
//! freeform maps.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level listing: the ordered sequence of file-level suites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub suites: Vec<Suite>,
}

/// A named grouping node in the catalog tree. May nest arbitrarily.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Suite {
    pub title: String,
    pub file: String,
    pub line: u32,
    pub suites: Vec<Suite>,
    pub specs: Vec<Spec>,
}

/// A single logical test definition. Runs once per execution project, so the
/// same spec carries one [`TestInstance`] per project that listed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spec {
    pub title: String,
    pub file: String,
    pub line: u32,
    pub tags: Vec<String>,
    pub tests: Vec<TestInstance>,
}

/// One execution-project-specific run record for a spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestInstance {
    pub project_name: String,
    pub annotations: Vec<Annotation>,
}

/// A runtime-assigned marker on a test instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
}

/// Annotation taxonomy. Anything beyond the three markers the tree view
/// understands round-trips as [`AnnotationKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationKind {
    Skip,
    Fixme,
    Fail,
    Other(String),
}

impl Default for AnnotationKind {
    fn default() -> Self {
        AnnotationKind::Other(String::new())
    }
}

impl From<String> for AnnotationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "skip" => AnnotationKind::Skip,
            "fixme" => AnnotationKind::Fixme,
            "fail" => AnnotationKind::Fail,
            _ => AnnotationKind::Other(s),
        }
    }
}

impl From<AnnotationKind> for String {
    fn from(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Skip => "skip".to_string(),
            AnnotationKind::Fixme => "fixme".to_string(),
            AnnotationKind::Fail => "fail".to_string(),
            AnnotationKind::Other(s) => s,
        }
    }
}

/// Identity of a logical test for deduplication. Two spec records sharing
/// this key denote the same test listed more than once (typically one record
/// per project batch) and must never be double-counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecKey {
    pub file: String,
    pub line: u32,
    pub title: String,
}

impl Spec {
    pub fn key(&self) -> SpecKey {
        SpecKey {
            file: self.file.clone(),
            line: self.line,
            title: self.title.clone(),
        }
    }
}

impl Suite {
    /// A transparent suite is a file-level wrapper with no semantic name of
    /// its own; its content attaches directly to the enclosing node.
    pub fn is_transparent(&self) -> bool {
        self.title.is_empty() || self.title == self.file
    }

    /// Declaration line: the suite's own line when present, else the first
    /// spec's line, else the first non-zero line found in child suites.
    pub fn declaration_line(&self) -> u32 {
        if self.line != 0 {
            return self.line;
        }
        if let Some(spec) = self.specs.first() {
            return spec.line;
        }
        self.suites
            .iter()
            .map(Suite::declaration_line)
            .find(|&line| line != 0)
            .unwrap_or(0)
    }

    /// Effective file: the suite's own when non-empty, else the nearest
    /// ancestor's (passed in by the traversal).
    pub fn effective_file<'a>(&'a self, parent_file: &'a str) -> &'a str {
        if self.file.is_empty() {
            parent_file
        } else {
            &self.file
        }
    }
}

impl Catalog {
    /// Parse the raw listing JSON. Malformed input aborts the run; there is
    /// no partial catalog.
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).context("failed to parse test listing JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_with_extra_fields() {
        let raw = br#"{
            "config": {"rootDir": "/tmp"},
            "suites": [{
                "title": "sanity/agentView.spec.ts",
                "file": "sanity/agentView.spec.ts",
                "suites": [{
                    "title": "agent tests",
                    "file": "sanity/agentView.spec.ts",
                    "line": 3,
                    "specs": [{
                        "title": "get started link",
                        "file": "sanity/agentView.spec.ts",
                        "line": 4,
                        "tags": ["smoke"],
                        "ok": true,
                        "tests": [{
                            "projectName": "chromium",
                            "annotations": [{"type": "fail"}],
                            "status": "skipped"
                        }]
                    }]
                }]
            }]
        }"#;

        let catalog = Catalog::from_json(raw).unwrap();
        assert_eq!(catalog.suites.len(), 1);
        assert_eq!(catalog.suites[0].title, "sanity/agentView.spec.ts");
        let spec = &catalog.suites[0].suites[0].specs[0];
        assert_eq!(spec.tests[0].project_name, "chromium");
        assert_eq!(spec.tests[0].annotations[0].kind, AnnotationKind::Fail);
    }

    #[test]
    fn malformed_listing_is_an_error() {
        assert!(Catalog::from_json(b"{not json").is_err());
    }

    #[test]
    fn unknown_annotation_kind_is_preserved() {
        let ann: Annotation = serde_json::from_str(r#"{"type": "slow"}"#).unwrap();
        assert_eq!(ann.kind, AnnotationKind::Other("slow".to_string()));
        assert_eq!(serde_json::to_string(&ann).unwrap(), r#"{"type":"slow"}"#);
    }

    #[test]
    fn declaration_line_falls_back_through_specs_and_children() {
        let own = Suite {
            line: 10,
            ..Suite::default()
        };
        assert_eq!(own.declaration_line(), 10);

        let from_spec = Suite {
            specs: vec![Spec {
                line: 20,
                ..Spec::default()
            }],
            ..Suite::default()
        };
        assert_eq!(from_spec.declaration_line(), 20);

        let from_child = Suite {
            suites: vec![Suite {
                specs: vec![Spec {
                    line: 30,
                    ..Spec::default()
                }],
                ..Suite::default()
            }],
            ..Suite::default()
        };
        assert_eq!(from_child.declaration_line(), 30);

        assert_eq!(Suite::default().declaration_line(), 0);
    }

    #[test]
    fn transparency_covers_unnamed_and_file_named_suites() {
        let unnamed = Suite::default();
        assert!(unnamed.is_transparent());

        let file_named = Suite {
            title: "a.spec.ts".to_string(),
            file: "a.spec.ts".to_string(),
            ..Suite::default()
        };
        assert!(file_named.is_transparent());

        let named = Suite {
            title: "auth suite".to_string(),
            file: "a.spec.ts".to_string(),
            ..Suite::default()
        };
        assert!(!named.is_transparent());
    }
}
