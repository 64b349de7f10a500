//! Aggregation of a (possibly filtered) catalog into a display tree.
//!
//! A first pass merges every raw spec record catalog-wide, keyed by
//! (file, line, title): tags and project names are unioned, and the three
//! annotation booleans are OR-ed across all contributing test instances. A
//! spec the runner listed once per project batch therefore collapses into one
//! entry whose project list spans all batches, wherever in the tree those
//! batches landed.
//!
//! The depth-first build pass then walks the catalog in order, resolves each
//! direct spec through the merged map, applies annotation visibility, emits
//! each key at most once across the whole traversal, and prunes branches
//! that end up with nothing visible. Transparent file-level wrapper suites
//! contribute no node of their own; their content is promoted into the
//! parent.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog::{AnnotationKind, Catalog, Spec, SpecKey, Suite};
use crate::filters::AnnotationToggles;

/// The finished display tree plus the two headline totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    pub files: Vec<FileNode>,
    /// Distinct (file, line, title) entries, each weighted by its number of
    /// distinct projects.
    pub total_tests: usize,
    /// File-grouping nodes that ended up with visible content.
    pub total_files: usize,
}

/// Synthetic grouping node labeled with a top-level suite's file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNode {
    pub file: String,
    pub specs: Vec<SpecLeaf>,
    pub children: Vec<SuiteNode>,
}

/// A named suite with visible content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteNode {
    pub title: String,
    pub file: String,
    pub line: u32,
    pub specs: Vec<SpecLeaf>,
    pub children: Vec<SuiteNode>,
}

/// One merged, deduplicated spec entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecLeaf {
    pub title: String,
    pub file: String,
    pub line: u32,
    /// Sorted union of tags across all contributing records.
    pub tags: Vec<String>,
    /// Sorted union of project names across all contributing instances.
    pub projects: Vec<String>,
    pub skipped: bool,
    pub fixme: bool,
    pub fail: bool,
}

/// Catalog-wide merge of all raw records sharing one key.
#[derive(Debug, Default)]
struct MergedSpec {
    tags: BTreeSet<String>,
    projects: BTreeSet<String>,
    skipped: bool,
    fixme: bool,
    fail: bool,
}

impl MergedSpec {
    fn absorb(&mut self, spec: &Spec) {
        self.tags.extend(spec.tags.iter().cloned());
        for test in &spec.tests {
            self.projects.insert(test.project_name.clone());
            for ann in &test.annotations {
                match ann.kind {
                    AnnotationKind::Skip => self.skipped = true,
                    AnnotationKind::Fixme => self.fixme = true,
                    AnnotationKind::Fail => self.fail = true,
                    AnnotationKind::Other(_) => {}
                }
            }
        }
    }

    /// With no toggle set everything is visible; otherwise at least one
    /// toggled marker must be present on the merged entry.
    fn visible(&self, toggles: AnnotationToggles) -> bool {
        !toggles.any()
            || (toggles.skipped && self.skipped)
            || (toggles.fixme && self.fixme)
            || (toggles.fail && self.fail)
    }

    fn leaf(&self, key: &SpecKey) -> SpecLeaf {
        SpecLeaf {
            title: key.title.clone(),
            file: key.file.clone(),
            line: key.line,
            tags: self.tags.iter().cloned().collect(),
            projects: self.projects.iter().cloned().collect(),
            skipped: self.skipped,
            fixme: self.fixme,
            fail: self.fail,
        }
    }
}

/// Build the display tree and totals for a catalog.
pub fn build_view(catalog: &Catalog, toggles: AnnotationToggles) -> TreeView {
    let merged = merge_catalog(catalog);
    let mut builder = Builder {
        merged,
        toggles,
        emitted: HashSet::new(),
        total_tests: 0,
    };

    let mut files = Vec::new();
    for top in &catalog.suites {
        // A top-level entry with no file cannot be grouped.
        if top.file.is_empty() {
            continue;
        }
        let (specs, children) = builder.collect(top, &top.file);
        if specs.is_empty() && children.is_empty() {
            continue;
        }
        let mut node = FileNode {
            file: top.file.clone(),
            specs: Vec::new(),
            children: Vec::new(),
        };
        if top.is_transparent() {
            node.specs = specs;
            node.children = children;
        } else {
            node.children.push(SuiteNode {
                title: top.title.clone(),
                file: top.file.clone(),
                line: top.declaration_line(),
                specs,
                children,
            });
        }
        files.push(node);
    }

    let total_files = files.len();
    TreeView {
        files,
        total_tests: builder.total_tests,
        total_files,
    }
}

fn merge_catalog(catalog: &Catalog) -> HashMap<SpecKey, MergedSpec> {
    let mut merged = HashMap::new();
    let mut pending: Vec<&Suite> = catalog.suites.iter().collect();
    while let Some(suite) = pending.pop() {
        for spec in &suite.specs {
            merged
                .entry(spec.key())
                .or_insert_with(MergedSpec::default)
                .absorb(spec);
        }
        pending.extend(suite.suites.iter());
    }
    merged
}

struct Builder {
    merged: HashMap<SpecKey, MergedSpec>,
    toggles: AnnotationToggles,
    /// Keys already emitted anywhere in this traversal; invocation lifetime
    /// only.
    emitted: HashSet<SpecKey>,
    total_tests: usize,
}

impl Builder {
    /// Visible specs and child nodes for one suite, in catalog order.
    /// Transparent children are spliced into the returned lists instead of
    /// contributing a node.
    fn collect(&mut self, suite: &Suite, parent_file: &str) -> (Vec<SpecLeaf>, Vec<SuiteNode>) {
        let current_file = suite.effective_file(parent_file);

        let mut specs = Vec::new();
        for spec in &suite.specs {
            let key = spec.key();
            let Some(entry) = self.merged.get(&key) else {
                continue;
            };
            if !entry.visible(self.toggles) {
                continue;
            }
            if !self.emitted.insert(key.clone()) {
                continue;
            }
            self.total_tests += entry.projects.len();
            specs.push(entry.leaf(&key));
        }

        let mut children = Vec::new();
        for child in &suite.suites {
            let (child_specs, child_children) = self.collect(child, current_file);
            if child_specs.is_empty() && child_children.is_empty() {
                continue;
            }
            if child.is_transparent() {
                specs.extend(child_specs);
                children.extend(child_children);
            } else {
                children.push(SuiteNode {
                    title: child.title.clone(),
                    file: child.effective_file(current_file).to_string(),
                    line: child.declaration_line(),
                    specs: child_specs,
                    children: child_children,
                });
            }
        }

        (specs, children)
    }
}
