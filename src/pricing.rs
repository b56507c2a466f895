//! Competitor pricing helpers and the pricing-intelligence rules.
//!
//! The model is asked to apply these same rules; [`derive_missing`] fills in
//! whatever it left empty so the display layer sees one consistent analysis.

use crate::content::PricingAnalysis;
use crate::product::CompetitorInput;

/// Distance from the market average, in rand, before we recommend a change.
pub const PRICE_GAP_THRESHOLD: f64 = 300.0;

/// Pricing guidance derived from the gap between our price and the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    IncreasePrice,
    LowerPrice,
    Hold,
}

impl Recommendation {
    pub fn classify(price_gap: f64) -> Self {
        if price_gap < -PRICE_GAP_THRESHOLD {
            Recommendation::IncreasePrice
        } else if price_gap > PRICE_GAP_THRESHOLD {
            Recommendation::LowerPrice
        } else {
            Recommendation::Hold
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            Recommendation::IncreasePrice => {
                "Increase price: we are well below the market average and can capture more margin."
            }
            Recommendation::LowerPrice => {
                "Lower price: we are well above the market average and risk losing sales."
            }
            Recommendation::Hold => "Hold price: we are in line with the market average.",
        }
    }
}

/// Lowest, highest and average of a set of competitor prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitorStats {
    pub lowest: f64,
    pub highest: f64,
    pub average: f64,
}

impl CompetitorStats {
    pub fn from_prices(prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }
        let lowest = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        Some(Self {
            lowest,
            highest,
            average,
        })
    }
}

/// Strict numeric check used for user input: plain decimal text only.
pub fn parse_numeric(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient parser for amounts written by the model, e.g. `"R 5 499.00"`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix('R')
        .or_else(|| trimmed.strip_prefix("ZAR"))
        .unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    parse_numeric(&cleaned)
}

/// Joins competitor rows into `"Name: Price, Name: Price"`.
///
/// Rows with a blank name or price are dropped.
pub fn competitor_pricing_string(competitors: &[CompetitorInput]) -> String {
    competitors
        .iter()
        .filter_map(|c| {
            let name = c.name.trim();
            let price = c.price.trim();
            (!name.is_empty() && !price.is_empty()).then(|| format!("{name}: {price}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses the comma-separated `"Name: Price"` form back into rows.
pub fn parse_competitor_pairs(text: &str) -> Vec<CompetitorInput> {
    text.split(',')
        .filter_map(|pair| {
            let (name, price) = pair.split_once(':')?;
            let name = name.trim();
            let price = price.trim();
            if name.is_empty() || price.is_empty() {
                tracing::debug!(pair, "skipping incomplete competitor pair");
                return None;
            }
            Some(CompetitorInput::new(name, price))
        })
        .collect()
}

/// Profit and margin (percent of the selling price).
pub fn profit_and_margin(suggested: Option<f64>, cost: Option<f64>) -> (Option<f64>, Option<f64>) {
    let (Some(suggested), Some(cost)) = (suggested, cost) else {
        return (None, None);
    };
    let profit = suggested - cost;
    let margin = (suggested != 0.0).then(|| profit / suggested * 100.0);
    (Some(profit), margin)
}

/// Fills every derivable field the model left empty. Supplied values win.
pub fn derive_missing(analysis: &mut PricingAnalysis, our_price: Option<f64>, cost: Option<f64>) {
    let prices: Vec<f64> = analysis.competitors.iter().map(|c| c.price).collect();
    if let Some(stats) = CompetitorStats::from_prices(&prices) {
        analysis.lowest_competitor_price.get_or_insert(stats.lowest);
        analysis.highest_competitor_price.get_or_insert(stats.highest);
        analysis.average_competitor_price.get_or_insert(stats.average);
    }

    if analysis.price_gap.is_none() {
        let ours = analysis.suggested_price.or(our_price);
        if let (Some(ours), Some(average)) = (ours, analysis.average_competitor_price) {
            analysis.price_gap = Some(ours - average);
        }
    }

    if analysis.recommendation.trim().is_empty() {
        if let Some(gap) = analysis.price_gap {
            analysis.recommendation = Recommendation::classify(gap).guidance().to_string();
        }
    }

    let (profit, margin) = profit_and_margin(analysis.suggested_price, cost);
    if analysis.profit.is_none() {
        analysis.profit = profit;
    }
    if analysis.margin.is_none() {
        analysis.margin = margin;
    }
}
