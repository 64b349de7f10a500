//! The three catalog filter passes: text terms, annotations, projects.

use std::collections::HashSet;

use super::matcher::FilterTerms;
use super::AnnotationToggles;
use crate::catalog::{AnnotationKind, Spec, Suite, TestInstance};

const NO_TAGS: &[String] = &[];

/// Text-term filter. Per suite:
///
/// 1. A negative hit on the suite's title or file drops the whole subtree;
///    no descendant rescues an explicitly excluded ancestor.
/// 2. A positive hit keeps the suite wholesale, but negative terms still
///    cascade into its children and specs.
/// 3. Otherwise recurse with the full rule; the suite survives only if some
///    child suite or spec does.
pub fn filter_by_terms(suites: &[Suite], terms: &FilterTerms) -> Vec<Suite> {
    let mut kept = Vec::new();

    for suite in suites {
        if terms.matches_negative(&suite.title, &suite.file, NO_TAGS) {
            continue;
        }

        if terms.matches(&suite.title, &suite.file, NO_TAGS) {
            kept.push(Suite {
                suites: scrub_negative(&suite.suites, terms),
                specs: suite
                    .specs
                    .iter()
                    .filter(|spec| !terms.matches_negative(&spec.title, &spec.file, &spec.tags))
                    .cloned()
                    .collect(),
                ..suite.clone()
            });
            continue;
        }

        let pruned = Suite {
            suites: filter_by_terms(&suite.suites, terms),
            specs: suite
                .specs
                .iter()
                .filter(|spec| terms.matches(&spec.title, &spec.file, &spec.tags))
                .cloned()
                .collect(),
            ..suite.clone()
        };
        if !pruned.suites.is_empty() || !pruned.specs.is_empty() {
            kept.push(pruned);
        }
    }

    kept
}

/// Negative-only cascade under a positively matched ancestor: descendants
/// are never re-tested against positive terms, only scrubbed for exclusions.
fn scrub_negative(suites: &[Suite], terms: &FilterTerms) -> Vec<Suite> {
    let mut kept = Vec::new();

    for suite in suites {
        if terms.matches_negative(&suite.title, &suite.file, NO_TAGS) {
            continue;
        }

        let pruned = Suite {
            suites: scrub_negative(&suite.suites, terms),
            specs: suite
                .specs
                .iter()
                .filter(|spec| !terms.matches_negative(&spec.title, &spec.file, &spec.tags))
                .cloned()
                .collect(),
            ..suite.clone()
        };
        if !pruned.suites.is_empty() || !pruned.specs.is_empty() {
            kept.push(pruned);
        }
    }

    kept
}

/// Annotation filter: a test instance survives iff no toggle is set or it
/// carries at least one annotation of a toggled kind. Instances are kept or
/// dropped whole, never per annotation.
pub fn filter_by_annotation(suites: &[Suite], toggles: AnnotationToggles) -> Vec<Suite> {
    prune_instances(suites, &|test| {
        !toggles.any() || instance_requested(test, toggles)
    })
}

/// Project filter: a test instance survives iff its project is in the set.
pub fn filter_by_project(suites: &[Suite], projects: &HashSet<String>) -> Vec<Suite> {
    prune_instances(suites, &|test| projects.contains(&test.project_name))
}

fn instance_requested(test: &TestInstance, toggles: AnnotationToggles) -> bool {
    test.annotations.iter().any(|ann| match ann.kind {
        AnnotationKind::Skip => toggles.skipped,
        AnnotationKind::Fixme => toggles.fixme,
        AnnotationKind::Fail => toggles.fail,
        AnnotationKind::Other(_) => false,
    })
}

/// Shared survive-if-nonempty propagation for the instance-level passes:
/// specs keep the instances the predicate admits, specs with none left are
/// dropped, and suites with neither specs nor children are dropped.
fn prune_instances(suites: &[Suite], keep: &dyn Fn(&TestInstance) -> bool) -> Vec<Suite> {
    let mut kept = Vec::new();

    for suite in suites {
        let pruned = Suite {
            suites: prune_instances(&suite.suites, keep),
            specs: suite
                .specs
                .iter()
                .filter_map(|spec| {
                    let tests: Vec<TestInstance> =
                        spec.tests.iter().filter(|t| keep(t)).cloned().collect();
                    if tests.is_empty() {
                        None
                    } else {
                        Some(Spec {
                            tests,
                            ..spec.clone()
                        })
                    }
                })
                .collect(),
            ..suite.clone()
        };
        if !pruned.suites.is_empty() || !pruned.specs.is_empty() {
            kept.push(pruned);
        }
    }

    kept
}
