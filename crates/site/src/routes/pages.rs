//! Static content pages.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use devrewoh_core::Tier;
use tracing::instrument;

use super::render;
use crate::error::Result;
use crate::filters;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub name: &'static str,
    pub tagline: &'static str,
}

/// About page template.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

/// Compress product page template.
#[derive(Template)]
#[template(path = "compress.html")]
pub struct CompressTemplate {
    pub tiers: Vec<TierCard>,
}

/// Compress API documentation template.
#[derive(Template)]
#[template(path = "docs.html")]
pub struct DocsTemplate;

/// Not-found page template.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

/// Display data for one pricing tier.
#[derive(Debug, Clone)]
pub struct TierCard {
    /// Form value posted to `/checkout`
    pub value: &'static str,
    pub name: &'static str,
    /// Price with currency symbol, e.g. `$39`
    pub price: String,
    /// Credit allowance with thousands separators
    pub credits: String,
}

impl From<Tier> for TierCard {
    fn from(tier: Tier) -> Self {
        Self {
            value: tier.as_str(),
            name: tier.display_name(),
            price: format!("${}", tier.amount_cents() / 100),
            credits: group_thousands(i64::from(tier.credits())),
        }
    }
}

/// Format `n` with comma thousands separators.
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Display the home page.
#[instrument]
pub async fn home() -> Result<Html<String>> {
    render(
        &HomeTemplate {
            name: "Chris",
            tagline: "Backend developer building with Rust",
        },
        "home",
    )
}

/// Display the about page.
#[instrument]
pub async fn about() -> Result<Html<String>> {
    render(&AboutTemplate, "about")
}

/// Display the Compress product and pricing page.
#[instrument]
pub async fn compress() -> Result<Html<String>> {
    let tiers = Tier::ALL.into_iter().map(TierCard::from).collect();
    render(&CompressTemplate { tiers }, "compress")
}

/// Display the Compress API docs.
#[instrument]
pub async fn docs() -> Result<Html<String>> {
    render(&DocsTemplate, "docs")
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Result<impl IntoResponse> {
    let page = render(&NotFoundTemplate, "404")?;
    Ok((StatusCode::NOT_FOUND, page))
}
