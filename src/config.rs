//! User style/display configuration.
//!
//! Looked up at `./.pwtree.json` first, then
//! `<config dir>/pwtree/config.json`. A missing file means defaults; a
//! malformed file is reported at warn level and replaced by defaults.
//! Configuration only affects presentation, never which tests survive
//! filtering.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::formatting::Style;

pub const LOCAL_CONFIG: &str = ".pwtree.json";

/// On-disk configuration shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub styles: Vec<StyleEntry>,
    pub show_projects: Option<bool>,
    pub show_tags: Option<bool>,
    pub show_file_lines: Option<bool>,
    pub emojis: EmojiOverrides,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleEntry {
    pub name: String,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub faint: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiOverrides {
    pub root: Option<String>,
    pub file: Option<String>,
    pub suite: Option<String>,
}

/// Which trailing decorations a spec label carries. Affects label
/// composition only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_projects: bool,
    pub show_tags: bool,
    pub show_file_lines: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_projects: true,
            show_tags: true,
            show_file_lines: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emojis {
    pub root: String,
    pub file: String,
    pub suite: String,
}

impl Default for Emojis {
    fn default() -> Self {
        Self {
            root: "🌳".to_string(),
            file: "📄".to_string(),
            suite: "📁".to_string(),
        }
    }
}

impl Emojis {
    pub fn none() -> Self {
        Self {
            root: String::new(),
            file: String::new(),
            suite: String::new(),
        }
    }
}

/// One style per rendering role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Theme {
    pub enumerator: Style,
    pub root: Style,
    pub tag: Style,
    pub project: Style,
    pub file_line: Style,
    pub skipped: Style,
    pub fixme: Style,
    pub fail: Style,
    pub test: Style,
    pub counter: Style,
    pub file: Style,
    pub suite: Style,
}

impl Theme {
    /// Built-in palette, used when no config overrides a role.
    pub fn standard() -> Self {
        Self {
            enumerator: Style::default().dimmed(),
            root: Style::default().bold(),
            tag: Style::colored(Color::Cyan),
            project: Style::colored(Color::Magenta),
            file_line: Style::default().dimmed(),
            skipped: Style::colored(Color::Yellow),
            fixme: Style::colored(Color::Magenta),
            fail: Style::colored(Color::Red),
            test: Style::default(),
            counter: Style::default().bold(),
            file: Style::colored(Color::Blue).bold(),
            suite: Style::default().bold(),
        }
    }

    /// Everything unstyled. Used for `--ci` and in tests.
    pub fn plain() -> Self {
        Self::default()
    }

    fn role_mut(&mut self, name: &str) -> Option<&mut Style> {
        match name {
            "enumerator" => Some(&mut self.enumerator),
            "root" => Some(&mut self.root),
            "tag" => Some(&mut self.tag),
            "project" => Some(&mut self.project),
            "fileLine" => Some(&mut self.file_line),
            "skipped" => Some(&mut self.skipped),
            "fixme" => Some(&mut self.fixme),
            "fail" => Some(&mut self.fail),
            "test" => Some(&mut self.test),
            "counter" => Some(&mut self.counter),
            "file" => Some(&mut self.file),
            "suite" => Some(&mut self.suite),
            _ => None,
        }
    }
}

/// Fully resolved presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub theme: Theme,
    pub display: DisplayOptions,
    pub emojis: Emojis,
}

impl AppConfig {
    /// Resolve configuration from the usual search paths. `ci` wins over
    /// everything: plain theme, no emojis, display defaults.
    pub fn load(ci: bool) -> Self {
        if ci {
            return Self {
                theme: Theme::plain(),
                display: DisplayOptions::default(),
                emojis: Emojis::none(),
            };
        }

        for path in search_paths() {
            if path.is_file() {
                return Self::load_from(&path);
            }
        }
        Self {
            theme: Theme::standard(),
            ..Self::default()
        }
    }

    /// Resolve from one explicit config file, falling back to defaults on
    /// any read or parse problem.
    pub fn load_from(path: &Path) -> Self {
        let fallback = Self {
            theme: Theme::standard(),
            ..Self::default()
        };

        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("could not read config {}: {err}", path.display());
                return fallback;
            }
        };
        let config: FileConfig = match serde_json::from_slice(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("could not parse config {}: {err}", path.display());
                return fallback;
            }
        };
        log::debug!("loaded config from {}", path.display());
        Self::from_file_config(config)
    }

    fn from_file_config(config: FileConfig) -> Self {
        let mut theme = Theme::standard();
        for entry in &config.styles {
            let Some(role) = theme.role_mut(&entry.name) else {
                log::warn!("unknown style role {:?} in config", entry.name);
                continue;
            };
            let mut style = Style::default();
            if !entry.color.is_empty() {
                match parse_color(&entry.color) {
                    Some(color) => style.color = Some(color),
                    None => log::warn!("unknown color {:?} in config", entry.color),
                }
            }
            style.bold = entry.bold;
            style.italic = entry.italic;
            style.dimmed = entry.faint;
            *role = style;
        }

        let mut emojis = Emojis::default();
        if let Some(root) = config.emojis.root {
            emojis.root = root;
        }
        if let Some(file) = config.emojis.file {
            emojis.file = file;
        }
        if let Some(suite) = config.emojis.suite {
            emojis.suite = suite;
        }

        Self {
            theme,
            display: DisplayOptions {
                show_projects: config.show_projects.unwrap_or(true),
                show_tags: config.show_tags.unwrap_or(true),
                show_file_lines: config.show_file_lines.unwrap_or(true),
            },
            emojis,
        }
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pwtree").join("config.json"));
    }
    paths
}

/// `#rrggbb` hex or one of the sixteen ANSI color names (numeric 0-15 also
/// accepted).
fn parse_color(value: &str) -> Option<Color> {
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::TrueColor { r, g, b });
        }
        return None;
    }

    match value.to_ascii_lowercase().as_str() {
        "black" | "0" => Some(Color::Black),
        "red" | "1" => Some(Color::Red),
        "green" | "2" => Some(Color::Green),
        "yellow" | "3" => Some(Color::Yellow),
        "blue" | "4" => Some(Color::Blue),
        "magenta" | "5" => Some(Color::Magenta),
        "cyan" | "6" => Some(Color::Cyan),
        "white" | "7" => Some(Color::White),
        "brightblack" | "8" => Some(Color::BrightBlack),
        "brightred" | "9" => Some(Color::BrightRed),
        "brightgreen" | "10" => Some(Color::BrightGreen),
        "brightyellow" | "11" => Some(Color::BrightYellow),
        "brightblue" | "12" => Some(Color::BrightBlue),
        "brightmagenta" | "13" => Some(Color::BrightMagenta),
        "brightcyan" | "14" => Some(Color::BrightCyan),
        "brightwhite" | "15" => Some(Color::BrightWhite),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn hex_and_named_colors_parse() {
        assert_eq!(
            parse_color("#5f87ff"),
            Some(Color::TrueColor {
                r: 0x5f,
                g: 0x87,
                b: 0xff
            })
        );
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("BrightCyan"), Some(Color::BrightCyan));
        assert_eq!(parse_color("9"), Some(Color::BrightRed));
        assert_eq!(parse_color("#zzz"), None);
        assert_eq!(parse_color("mauve"), None);
    }

    #[test]
    fn config_file_overrides_roles_toggles_and_emojis() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "styles": [
                    {{"name": "tag", "color": "#112233", "bold": true}},
                    {{"name": "bogus", "color": "red"}}
                ],
                "showTags": false,
                "emojis": {{"root": "T"}}
            }}"##
        )
        .unwrap();

        let config = AppConfig::load_from(file.path());
        assert_eq!(
            config.theme.tag.color,
            Some(Color::TrueColor {
                r: 0x11,
                g: 0x22,
                b: 0x33
            })
        );
        assert!(config.theme.tag.bold);
        // Untouched roles keep the standard palette.
        assert_eq!(config.theme.fail, Theme::standard().fail);
        assert!(!config.display.show_tags);
        assert!(config.display.show_projects);
        assert_eq!(config.emojis.root, "T");
        assert_eq!(config.emojis.file, Emojis::default().file);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = AppConfig::load_from(file.path());
        assert_eq!(config.theme, Theme::standard());
        assert_eq!(config.display, DisplayOptions::default());
    }

    #[test]
    fn ci_mode_strips_styles_and_emojis() {
        let config = AppConfig::load(true);
        assert_eq!(config.theme, Theme::plain());
        assert_eq!(config.emojis, Emojis::none());
        assert_eq!(config.display, DisplayOptions::default());
    }
}
