use std::collections::HashSet;
use std::fs;

use anyhow::{Context, Result};
use clap::Parser;

use pwtree::cli::Cli;
use pwtree::config::AppConfig;
use pwtree::formatting::FormattingConfig;
use pwtree::io::{run_playwright_list, ListInvocation};
use pwtree::{
    build_view, filter_by_annotation, filter_by_project, filter_by_terms, render_tree,
    AnnotationToggles, Catalog, FilterTerms,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let formatting = if cli.ci {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    formatting.apply();

    let app = AppConfig::load(cli.ci);
    let emojis = if cli.ci || !formatting.emoji.should_use_emoji() {
        pwtree::Emojis::none()
    } else {
        app.emojis.clone()
    };

    let raw = acquire_listing(&cli)?;
    let mut catalog = Catalog::from_json(&raw)?;

    if !cli.projects.is_empty() {
        let projects: HashSet<String> = cli.projects.iter().cloned().collect();
        catalog.suites = filter_by_project(&catalog.suites, &projects);
    }

    if let Some(filter) = &cli.filter {
        let terms = FilterTerms::from_arg(filter);
        if !terms.is_empty() {
            catalog.suites = filter_by_terms(&catalog.suites, &terms);
        }
    }

    let toggles = AnnotationToggles {
        skipped: cli.skipped,
        fixme: cli.fixme,
        fail: cli.fail,
    };
    if toggles.any() {
        catalog.suites = filter_by_annotation(&catalog.suites, toggles);
    }

    let view = build_view(&catalog, toggles);
    print!("{}", render_tree(&view, &app.theme, &app.display, &emojis));
    Ok(())
}

fn acquire_listing(cli: &Cli) -> Result<Vec<u8>> {
    if let Some(path) = &cli.json_data_path {
        return fs::read(path)
            .with_context(|| format!("failed to read listing data from {}", path.display()));
    }

    let invocation = ListInvocation {
        projects: cli.projects.clone(),
        only_changed: cli.only_changed,
        last_failed: cli.last_failed,
        config: cli.config.clone(),
    };
    Ok(run_playwright_list(&invocation)?)
}
