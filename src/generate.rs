//! Static page generation for the wine catalog

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::fs;
use std::path::Path;

use crate::catalog::load_catalog;
use crate::types::{CategoryGroup, Wine};
use crate::utils::osc8_file_link;

/// The generated page, written to the working directory and overwritten
/// on every run.
pub const OUTPUT_FILE: &str = "index.html";

const SITE_TITLE: &str = "Новое русское вино";
const FOUNDED_YEAR: i32 = 1920;

/// Run the whole pipeline once: load, group, render, write.
pub fn run_build(catalog_path: &Path) -> Result<()> {
    println!("Loading catalog from {}...", catalog_path.display());
    let catalog = load_catalog(catalog_path)?;
    println!(
        "Loaded {} wines in {} categories",
        catalog.wines.len(),
        catalog.categories.len()
    );
    if catalog.is_empty() {
        log::warn!("catalog {} has no rows", catalog_path.display());
    }

    let years = (Local::now().year() - FOUNDED_YEAR).max(0) as u32;
    let groups = catalog.by_category();
    let html = render_page(&age_phrase(years), &groups);

    fs::write(OUTPUT_FILE, html).with_context(|| format!("Failed to write {}", OUTPUT_FILE))?;
    println!(
        "Generated {}",
        osc8_file_link(Path::new(OUTPUT_FILE), OUTPUT_FILE)
    );
    Ok(())
}

/// Russian plural agreement for the winery age: "N лет/год/года".
///
/// 11..=14 take "лет" and are absorbed by the first rule before the
/// last-digit rules apply.
pub fn age_phrase(years: u32) -> String {
    let word = match (years % 100, years % 10) {
        (5..=20, _) => "лет",
        (_, 1) => "год",
        (_, 2..=4) => "года",
        _ => "лет",
    };
    format!("{} {}", years, word)
}

// HTML generation helpers
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Slugify a category name for anchor use
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Anchor id for a category section; positional fallback for labels that
/// slugify to nothing (e.g. the blank category).
fn category_anchor(category: &str, index: usize) -> String {
    let slug = slugify(category);
    if slug.is_empty() {
        format!("category-{}", index + 1)
    } else {
        slug
    }
}

fn css_styles() -> &'static str {
    r#"
:root {
    --wine: #5e2129;
    --wine-light: #7d3240;
    --gold: #c9a227;
    --bg: #faf6f0;
    --card-bg: #ffffff;
    --text: #2b2024;
    --text-muted: #75636a;
    --border: #e8ddd2;
    --shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06);
    --radius: 8px;
}

* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: Georgia, 'Times New Roman', serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.6;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 24px;
}

header {
    background: linear-gradient(135deg, var(--wine) 0%, var(--wine-light) 100%);
    color: white;
    padding: 48px 0 32px;
    text-align: center;
    box-shadow: var(--shadow);
}

header h1 {
    font-size: 2.25rem;
    font-weight: 700;
    letter-spacing: 0.02em;
}

header .winery-age {
    margin-top: 8px;
    font-size: 1.125rem;
    color: var(--gold);
}

header nav {
    margin-top: 24px;
    display: flex;
    justify-content: center;
    gap: 24px;
    flex-wrap: wrap;
}

header nav a {
    color: rgba(255, 255, 255, 0.9);
    text-decoration: none;
    font-size: 0.9375rem;
    border-bottom: 1px solid transparent;
}

header nav a:hover {
    color: white;
    border-bottom-color: var(--gold);
}

main {
    padding: 48px 0;
}

.category-section {
    margin-bottom: 48px;
}

.category-section h2 {
    font-size: 1.5rem;
    color: var(--wine);
    margin-bottom: 24px;
    padding-bottom: 8px;
    border-bottom: 2px solid var(--gold);
}

.wine-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
    gap: 24px;
}

.wine-card {
    background: var(--card-bg);
    border-radius: var(--radius);
    box-shadow: var(--shadow);
    overflow: hidden;
    position: relative;
}

.offer-badge {
    position: absolute;
    top: 12px;
    left: 0;
    background: var(--gold);
    color: var(--wine);
    padding: 4px 12px;
    font-size: 0.75rem;
    font-weight: 700;
    text-transform: uppercase;
    letter-spacing: 0.05em;
}

.wine-card-image {
    aspect-ratio: 1;
    background: #f3ece2;
    display: flex;
    align-items: center;
    justify-content: center;
    overflow: hidden;
}

.wine-card-image img {
    max-width: 100%;
    max-height: 100%;
    object-fit: contain;
    padding: 16px;
}

.wine-card-content {
    padding: 16px;
}

.wine-card-title {
    font-weight: 700;
    font-size: 1.125rem;
    margin-bottom: 4px;
}

.wine-card-grape {
    font-size: 0.875rem;
    color: var(--text-muted);
    margin-bottom: 8px;
}

.wine-card-price {
    font-size: 1.125rem;
    font-weight: 700;
    color: var(--wine);
}

footer {
    background: var(--wine);
    color: rgba(255, 255, 255, 0.8);
    padding: 24px 0;
    text-align: center;
    font-size: 0.875rem;
}
"#
}

/// Page header with the winery age and category navigation
fn page_header(age: &str, groups: &[CategoryGroup]) -> String {
    let nav_html: String = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let label = if group.category.is_empty() {
                "Прочее"
            } else {
                group.category.as_str()
            };
            format!(
                r##"<a href="#{}">{}</a>"##,
                category_anchor(&group.category, i),
                html_escape(label)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
    <header>
        <div class="container">
            <h1>{}</h1>
            <p class="winery-age">Уже {} с вами</p>
            <nav>{}</nav>
        </div>
    </header>
    <main>
        <div class="container">
"#,
        html_escape(SITE_TITLE),
        css_styles(),
        html_escape(SITE_TITLE),
        html_escape(age),
        nav_html
    )
}

fn page_footer() -> &'static str {
    r#"
        </div>
    </main>
    <footer>
        <div class="container">
            <p>Новое русское вино — винодельня из Абрау-Дюрсо.</p>
            <p>Доставка по всей России.</p>
        </div>
    </footer>
</body>
</html>
"#
}

/// Generate a single wine card
fn wine_card_html(wine: &Wine) -> String {
    let image_html = if wine.img_url.is_empty() {
        "<span>Фото скоро появится</span>".to_string()
    } else {
        format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(&wine.img_url),
            html_escape(&wine.wine_name)
        )
    };

    let badge_html = if wine.special_offer {
        r#"<span class="offer-badge">Выгодное предложение</span>"#
    } else {
        ""
    };

    let grape_html = if wine.grape.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="wine-card-grape">Сорт: {}</div>"#,
            html_escape(&wine.grape)
        )
    };

    let price_html = if wine.price.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="wine-card-price">{} руб.</div>"#,
            html_escape(&wine.price)
        )
    };

    format!(
        r#"<div class="wine-card">
    {}
    <div class="wine-card-image">{}</div>
    <div class="wine-card-content">
        <div class="wine-card-title">{}</div>
        {}
        {}
    </div>
</div>"#,
        badge_html,
        image_html,
        html_escape(&wine.wine_name),
        grape_html,
        price_html
    )
}

fn category_section_html(group: &CategoryGroup, index: usize) -> String {
    let heading = if group.category.is_empty() {
        "Прочее"
    } else {
        group.category.as_str()
    };

    let mut html = format!(
        r#"<section class="category-section" id="{}">
<h2>{}</h2>
<div class="wine-grid">"#,
        category_anchor(&group.category, index),
        html_escape(heading)
    );
    for wine in &group.wines {
        html.push_str(&wine_card_html(wine));
    }
    html.push_str("</div></section>");
    html
}

/// Render the full page. Pure function of its inputs: identical context
/// renders byte-identical HTML.
pub fn render_page(age: &str, groups: &[CategoryGroup]) -> String {
    let mut html = page_header(age, groups);
    for (i, group) in groups.iter().enumerate() {
        html.push_str(&category_section_html(group, i));
    }
    html.push_str(page_footer());
    html
}
