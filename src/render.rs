//! Drawing the display tree as rounded-branch terminal text.
//!
//! The renderer is purely presentational: it composes and styles labels from
//! a [`TreeView`] and never filters or counts. Branch glyphs use the rounded
//! style (`├──` for siblings, `╰──` for the last child, `│` continuation).

use crate::config::{DisplayOptions, Emojis, Theme};
use crate::view::{FileNode, SpecLeaf, SuiteNode, TreeView};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "╰── ";
const CONTINUE: &str = "│   ";
const INDENT: &str = "    ";

/// Render the whole view: root line, tree body, blank line, counter.
pub fn render_tree(
    view: &TreeView,
    theme: &Theme,
    display: &DisplayOptions,
    emojis: &Emojis,
) -> String {
    let mut out = String::new();
    out.push('\n');

    let title = format!("{} Playwright-tree", emojis.root);
    out.push_str(&theme.root.paint(title.trim()));
    out.push('\n');

    let mut renderer = Renderer {
        theme,
        display,
        emojis,
        out: &mut out,
    };
    let last = view.files.len().saturating_sub(1);
    for (i, file) in view.files.iter().enumerate() {
        renderer.file_node(file, "", i == last);
    }

    out.push('\n');
    out.push_str(&theme.counter.paint(&counter_line(view)));
    out.push('\n');
    out
}

/// `Total: N test(s) in M file(s)` with naive pluralization.
pub fn counter_line(view: &TreeView) -> String {
    format!(
        "Total: {} test{} in {} file{}",
        view.total_tests,
        pluralize(view.total_tests),
        view.total_files,
        pluralize(view.total_files),
    )
}

fn pluralize(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

struct Renderer<'a> {
    theme: &'a Theme,
    display: &'a DisplayOptions,
    emojis: &'a Emojis,
    out: &'a mut String,
}

impl Renderer<'_> {
    fn file_node(&mut self, node: &FileNode, prefix: &str, last: bool) {
        let label = format!("{} {}", self.emojis.file, node.file);
        let label = self.theme.file.paint(label.trim());
        self.line(prefix, last, &label);

        let child_prefix = self.extend(prefix, last);
        self.content(&node.specs, &node.children, &child_prefix);
    }

    fn suite_node(&mut self, node: &SuiteNode, prefix: &str, last: bool) {
        let locator = if self.display.show_file_lines {
            self.theme
                .file_line
                .paint(&format!("({}:{})", node.file, node.line))
        } else {
            String::new()
        };
        let title = format!("{} {}", self.emojis.suite, node.title);
        let mut label = self.theme.suite.paint(title.trim());
        if !locator.is_empty() {
            label.push(' ');
            label.push_str(&locator);
        }
        self.line(prefix, last, &label);

        let child_prefix = self.extend(prefix, last);
        self.content(&node.specs, &node.children, &child_prefix);
    }

    fn content(&mut self, specs: &[SpecLeaf], children: &[SuiteNode], prefix: &str) {
        let total = specs.len() + children.len();
        for (i, leaf) in specs.iter().enumerate() {
            let label = self.spec_label(leaf);
            self.line(prefix, i + 1 == total, &label);
        }
        for (i, child) in children.iter().enumerate() {
            self.suite_node(child, prefix, specs.len() + i + 1 == total);
        }
    }

    /// title[markers] (projects) [tags] (file:line), each decoration
    /// independently toggleable.
    fn spec_label(&self, leaf: &SpecLeaf) -> String {
        let mut title = leaf.title.clone();
        if leaf.skipped {
            title.push_str(" [skipped]");
        }
        if leaf.fixme {
            title.push_str(" [fixme]");
        }
        if leaf.fail {
            title.push_str(" [fail]");
        }

        let title_style = if leaf.skipped {
            &self.theme.skipped
        } else if leaf.fixme {
            &self.theme.fixme
        } else if leaf.fail {
            &self.theme.fail
        } else {
            &self.theme.test
        };
        let mut label = title_style.paint(&title);

        if self.display.show_projects && !leaf.projects.is_empty() {
            label.push(' ');
            label.push_str(
                &self
                    .theme
                    .project
                    .paint(&format!("({})", leaf.projects.join(", "))),
            );
        }
        if self.display.show_tags && !leaf.tags.is_empty() {
            label.push(' ');
            label.push_str(&self.theme.tag.paint(&format!("[{}]", leaf.tags.join(", "))));
        }
        if self.display.show_file_lines {
            label.push(' ');
            label.push_str(
                &self
                    .theme
                    .file_line
                    .paint(&format!("({}:{})", leaf.file, leaf.line)),
            );
        }
        label
    }

    fn line(&mut self, prefix: &str, last: bool, label: &str) {
        let branch = if last { LAST_BRANCH } else { BRANCH };
        self.out.push_str(prefix);
        self.out.push_str(&self.theme.enumerator.paint(branch));
        self.out.push_str(label);
        self.out.push('\n');
    }

    fn extend(&self, prefix: &str, last: bool) -> String {
        let continuation = if last { INDENT } else { CONTINUE };
        format!("{prefix}{}", self.theme.enumerator.paint(continuation))
    }
}
