use std::fmt::Write;

use itertools::Itertools;
use vibe_core::{
    config::Config,
    filter::TypeFilter,
    model::{Brand, Model},
    pagination::{PageInfo, PageWindow},
    view::{DetailTab, DetailView, ListPage},
};

pub fn config(config: &Config) -> Result<String, serde_json::Error> {
    let path = Config::config_path()
        .map_or_else(|| "(no config directory)".to_string(), |p| p.display().to_string());
    Ok(format!(
        "# {}\n{}",
        path,
        serde_json::to_string_pretty(config)?
    ))
}

pub fn brands(page: &ListPage<'_, Brand>) -> String {
    let mut out = String::new();
    if page.items.is_empty() {
        out.push_str("No brands found.\n");
    }
    for brand in &page.items {
        let _ = writeln!(out, "{:>6}  {}", brand.id, brand.name);
    }
    footer(&mut out, page.warnings, &page.info, page.window);
    out
}

pub fn models(page: &ListPage<'_, Model>, filter: &TypeFilter) -> String {
    let mut out = String::new();
    if !filter.is_all() {
        let _ = writeln!(out, "Type: {}", filter.label());
    }
    if page.items.is_empty() {
        out.push_str("No models found.\n");
    }
    for model in &page.items {
        let _ = writeln!(
            out,
            "{:>6}  {}  [{}]  {}",
            model.id,
            model.name,
            model.kind,
            model.price_label()
        );
    }
    footer(&mut out, page.warnings, &page.info, page.window);
    out
}

pub fn model(view: &DetailView<'_>) -> String {
    let model = view.model;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", model.name, model.kind);
    let _ = writeln!(out, "{}", model.price_label());
    if !model.description().is_empty() {
        let _ = writeln!(out, "\n{}", model.description());
    }

    let _ = writeln!(out, "\n{}", DetailTab::Specs.label());
    let specs = model.specs.clone().unwrap_or_default();
    for (label, value) in specs.rows() {
        let _ = writeln!(out, "  {label:<14}{value}");
    }

    let _ = writeln!(out, "\n{}", DetailTab::Musicians.label());
    if view.musicians.is_empty() {
        out.push_str("  No musicians listed for this model.\n");
    } else {
        let _ = writeln!(out, "  {}", view.musicians.iter().map(|m| &m.name).join(", "));
    }
    footer(&mut out, view.warnings, &view.info, view.window);
    out
}

fn footer(out: &mut String, warnings: &[String], info: &PageInfo, window: Option<PageWindow>) {
    if let Some(window) = window {
        let pages = window
            .pages()
            .map(|page| {
                if page == info.current_page {
                    format!("[{}]", page + 1)
                } else {
                    (page + 1).to_string()
                }
            })
            .join(" ");
        let lead = if window.leading_ellipsis { "… " } else { "" };
        let trail = if window.trailing_ellipsis { " …" } else { "" };
        let _ = writeln!(out, "\nPage {lead}{pages}{trail}");
        if let Some(summary) = info.summary() {
            let _ = writeln!(out, "{summary}");
        }
    }
    if !warnings.is_empty() {
        let _ = writeln!(out, "\nWarning: {}", warnings.iter().join("; "));
    }
}
