//! Substring matching of catalog entries against filter terms.
//!
//! Terms come from a single `--filter` argument, split on `;`. A leading `-`
//! marks a term as an exclusion; exclusion always dominates. Matching is
//! case-sensitive containment against the candidate's title, file, and tags
//! (tags are additionally checked with an `@` sigil prepended, so `@smoke`
//! finds a tag stored as `smoke` regardless of how the catalog spells it).

/// A parsed filter: positive terms include, negative terms exclude.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTerms {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl FilterTerms {
    /// Parse raw terms: trim each, drop empties, strip the `-` prefix into
    /// the negative set.
    pub fn parse<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms = FilterTerms::default();
        for term in raw {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            match term.strip_prefix('-') {
                Some(negated) => terms.negative.push(negated.to_string()),
                None => terms.positive.push(term.to_string()),
            }
        }
        terms
    }

    /// Parse a single semicolon-delimited CLI argument.
    pub fn from_arg(arg: &str) -> Self {
        Self::parse(arg.split(';'))
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Full match rule: any negative hit rejects outright; with no positive
    /// terms everything not excluded passes; otherwise at least one positive
    /// term must hit.
    pub fn matches(&self, title: &str, file: &str, tags: &[String]) -> bool {
        if self.matches_negative(title, file, tags) {
            return false;
        }
        if self.positive.is_empty() {
            return true;
        }
        self.positive
            .iter()
            .any(|term| term_hits(term, title, file, tags))
    }

    /// Negative-only rule, used to hard-exclude suites before positive
    /// matching and to cascade exclusion under a positively matched ancestor.
    pub fn matches_negative(&self, title: &str, file: &str, tags: &[String]) -> bool {
        self.negative
            .iter()
            .any(|term| term_hits(term, title, file, tags))
    }
}

fn term_hits(term: &str, title: &str, file: &str, tags: &[String]) -> bool {
    title.contains(term)
        || file.contains(term)
        || tags
            .iter()
            .any(|tag| tag.contains(term) || format!("@{tag}").contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NO_TAGS: &[String] = &[];

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn parse_trims_drops_empties_and_splits_sign() {
        let terms = FilterTerms::parse([" auth ", "", "  ", "-skip", "-"]);
        assert_eq!(
            terms,
            FilterTerms {
                positive: vec!["auth".to_string()],
                negative: vec!["skip".to_string(), String::new()],
            }
        );
    }

    #[test]
    fn from_arg_splits_on_semicolons() {
        let terms = FilterTerms::from_arg("auth; -skip;login");
        assert!(terms.matches("should login", "x.spec.ts", NO_TAGS));
        assert!(terms.matches_negative("skip on timeout", "x.spec.ts", NO_TAGS));
    }

    #[test]
    fn positive_term_matches_title_file_or_tag() {
        let terms = FilterTerms::parse(["started"]);
        assert!(terms.matches("get started link", "tests/example.spec.ts", &tags(&["smoke"])));

        let by_file = FilterTerms::parse(["example.spec"]);
        assert!(by_file.matches("get started link", "tests/example.spec.ts", NO_TAGS));

        let by_tag = FilterTerms::parse(["smoke"]);
        assert!(by_tag.matches("get started link", "tests/example.spec.ts", &tags(&["smoke"])));
    }

    #[test]
    fn at_sigil_matches_bare_tags() {
        let terms = FilterTerms::parse(["@smoke"]);
        assert!(terms.matches("title", "file.ts", &tags(&["smoke"])));
        assert!(!terms.matches("title", "file.ts", &tags(&["sanity"])));
    }

    #[test]
    fn negative_tag_rejects_despite_positive_hit() {
        let terms = FilterTerms::parse(["started", "-smoke"]);
        assert!(!terms.matches("get started link", "tests/example.spec.ts", &tags(&["smoke"])));
    }

    #[test]
    fn pure_negative_filter_keeps_non_matching_candidates() {
        let terms = FilterTerms::parse(["-flaky"]);
        assert!(terms.matches("steady test", "file.ts", &tags(&["smoke"])));
        assert!(!terms.matches("flaky test", "file.ts", NO_TAGS));
        assert!(terms.matches_negative("test", "file.ts", &tags(&["flaky"])));
    }

    #[test]
    fn no_terms_match_everything() {
        let terms = FilterTerms::parse(Vec::<String>::new());
        assert!(terms.is_empty());
        assert!(terms.matches("anything", "anywhere", NO_TAGS));
        assert!(!terms.matches_negative("anything", "anywhere", NO_TAGS));
    }

    proptest! {
        // Exclusion dominates: a candidate hit by any negative term never
        // passes the full rule, whatever positive terms are present.
        #[test]
        fn negative_dominance(
            title in "[a-z]{1,12}",
            file in "[a-z]{1,12}",
            tag in "[a-z]{1,8}",
            neg in "[a-z]{1,4}",
            pos in "[a-z]{1,4}",
        ) {
            let candidate_tags = vec![tag];
            let terms = FilterTerms::parse([pos.clone(), format!("-{neg}")]);
            if terms.matches_negative(&title, &file, &candidate_tags) {
                prop_assert!(!terms.matches(&title, &file, &candidate_tags));
            }
        }

        // A purely negative filter admits exactly the candidates it does not
        // exclude.
        #[test]
        fn pure_negative_inclusiveness(
            title in "[a-z]{1,12}",
            file in "[a-z]{1,12}",
            neg in "[a-z]{1,4}",
        ) {
            let terms = FilterTerms::parse([format!("-{neg}")]);
            let excluded = terms.matches_negative(&title, &file, NO_TAGS);
            prop_assert_eq!(terms.matches(&title, &file, NO_TAGS), !excluded);
        }
    }
}
