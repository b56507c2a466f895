//! Plain-text presentation of a generated content package.

use std::fmt::Write;

use crate::content::{GeneratedContent, PricingAnalysis};
use crate::messages::NOT_AVAILABLE;
use crate::text_utils::{split_list, truncate_text};

pub const PRODUCT_URL_PREFIX: &str = "https://techrestored.co.za/product/";
pub const SEO_TITLE_LIMIT: usize = 60;
pub const SEO_DESCRIPTION_LIMIT: usize = 160;

/// `R 1234.50`, or `N/A` when the amount is missing or not finite.
pub fn format_price(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() => format!("R {value:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.1}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn split_tags(tags: &str) -> Vec<String> {
    split_list(tags)
}

/// Parses `Key: Value` lines. Lines without a colon or with an empty key are
/// skipped.
pub fn attribute_pairs(attributes: &str) -> Vec<(String, String)> {
    attributes
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Search-result preview for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoSnippet {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl SeoSnippet {
    pub fn from_content(content: &GeneratedContent) -> Self {
        Self {
            title: truncate_text(&content.product_title, SEO_TITLE_LIMIT),
            url: format!("{PRODUCT_URL_PREFIX}{}", content.url_slug),
            description: truncate_text(&content.meta_description, SEO_DESCRIPTION_LIMIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub name: String,
    pub price: f64,
    /// Percentage of the highest price in the comparison.
    pub share_of_max: f64,
    pub is_suggested: bool,
}

/// Our suggested price next to each competitor, highest first.
pub fn market_comparison(analysis: &PricingAnalysis) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = analysis
        .suggested_price
        .filter(|p| p.is_finite())
        .map(|price| ComparisonRow {
            name: "Our Suggested Price".to_string(),
            price,
            share_of_max: 0.0,
            is_suggested: true,
        })
        .into_iter()
        .chain(
            analysis
                .competitors
                .iter()
                .filter(|c| c.price.is_finite())
                .map(|c| ComparisonRow {
                    name: c.name.clone(),
                    price: c.price,
                    share_of_max: 0.0,
                    is_suggested: false,
                }),
        )
        .collect();

    rows.sort_by(|a, b| b.price.total_cmp(&a.price));
    let max = rows.first().map(|r| r.price).unwrap_or(0.0);
    for row in &mut rows {
        row.share_of_max = if max > 0.0 {
            row.price / max * 100.0
        } else {
            0.0
        };
    }
    rows
}

fn or_not_available(text: &str) -> &str {
    if text.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        text
    }
}

/// Renders every section of a content package as plain text.
pub fn render_content(content: &GeneratedContent) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_sections(&mut out, content);
    out
}

fn write_sections(out: &mut String, content: &GeneratedContent) -> std::fmt::Result {
    let pricing = &content.pricing_analysis;

    writeln!(out, "1. Product Title")?;
    writeln!(out, "{}\n", or_not_available(&content.product_title))?;

    writeln!(out, "2. SEO")?;
    writeln!(out, "Key Phrase: {}", or_not_available(&content.seo_key_phrase))?;
    writeln!(out, "URL Slug: {}", or_not_available(&content.url_slug))?;
    writeln!(out, "Meta Description: {}\n", or_not_available(&content.meta_description))?;

    let snippet = SeoSnippet::from_content(content);
    writeln!(out, "3. Search Preview")?;
    writeln!(out, "{}\n{}\n{}\n", snippet.title, snippet.url, snippet.description)?;

    writeln!(out, "4. Short Description (HTML)")?;
    writeln!(out, "{}\n", or_not_available(&content.short_description_html))?;

    writeln!(out, "5. Long Description (HTML)")?;
    writeln!(out, "{}\n", or_not_available(&content.long_description_html))?;

    writeln!(out, "6. Attributes")?;
    let attributes = attribute_pairs(&content.product_attributes);
    if attributes.is_empty() {
        writeln!(out, "{NOT_AVAILABLE}")?;
    }
    for (key, value) in &attributes {
        writeln!(out, "- {key}: {value}")?;
    }
    writeln!(out)?;

    writeln!(out, "7. Tags")?;
    let tags = split_tags(&content.product_tags);
    if tags.is_empty() {
        writeln!(out, "{NOT_AVAILABLE}\n")?;
    } else {
        writeln!(out, "{}\n", tags.join(" | "))?;
    }

    writeln!(out, "8. Pricing Analysis")?;
    writeln!(out, "Lowest Competitor: {}", format_price(pricing.lowest_competitor_price))?;
    writeln!(out, "Highest Competitor: {}", format_price(pricing.highest_competitor_price))?;
    writeln!(out, "Average Competitor: {}", format_price(pricing.average_competitor_price))?;
    writeln!(out, "Suggested Price: {}", format_price(pricing.suggested_price))?;
    writeln!(out, "Price Gap: {}", format_price(pricing.price_gap))?;
    writeln!(out, "Profit: {}", format_price(pricing.profit))?;
    writeln!(out, "Margin: {}", format_percent(pricing.margin))?;
    writeln!(out, "Market Positioning: {}", or_not_available(&pricing.market_positioning))?;
    writeln!(out, "Recommendation: {}", or_not_available(&pricing.recommendation))?;
    writeln!(out, "Rationale: {}\n", or_not_available(&pricing.rationale))?;

    writeln!(out, "9. Market Comparison")?;
    let rows = market_comparison(pricing);
    if rows.is_empty() {
        writeln!(out, "{NOT_AVAILABLE}")?;
    }
    for row in rows {
        let marker = if row.is_suggested { " *" } else { "" };
        writeln!(
            out,
            "- {}{marker}: {} ({:.0}%)",
            row.name,
            format_price(Some(row.price)),
            row.share_of_max
        )?;
    }
    Ok(())
}
