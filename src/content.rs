//! Marketing content returned by the generative model.
//!
//! The model is not trusted to get JSON types right, so every field is read
//! leniently: strings may arrive as numbers, amounts may arrive as strings,
//! and anything unusable becomes empty or `None` rather than zero.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::pricing;
use crate::product::ProductInput;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub seo_key_phrase: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub long_description_html: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_description_html: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub meta_description: String,
    /// One `Key: Value` pair per line.
    #[serde(default, deserialize_with = "attribute_lines")]
    pub product_attributes: String,
    /// Comma-separated.
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_tags: String,
    pub pricing_analysis: PricingAnalysis,
}

impl GeneratedContent {
    /// Completes the pricing analysis from the input that produced it.
    pub fn derive_pricing(&mut self, input: &ProductInput) {
        let our_price = pricing::parse_numeric(&input.price);
        let cost = input.cost_price_text().and_then(pricing::parse_numeric);
        pricing::derive_missing(&mut self.pricing_analysis, our_price, cost);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingAnalysis {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub lowest_competitor_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub highest_competitor_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub average_competitor_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub market_positioning: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub suggested_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price_gap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendation: String,
    /// Percent of the suggested price.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub margin: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub profit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rationale: String,
    #[serde(default, deserialize_with = "lenient_competitors")]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub price: f64,
}

impl Competitor {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn value_to_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => pricing::parse_amount(s),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_to_text).unwrap_or_default())
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_amount))
}

fn attribute_lines<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .map(|(key, value)| format!("{key}: {}", value_to_text(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Some(other) => value_to_text(other),
        None => String::new(),
    })
}

fn lenient_competitors<'de, D>(deserializer: D) -> Result<Vec<Competitor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let name = entry.get("name").cloned().map(value_to_text)?;
            let price = entry.get("price").and_then(value_to_amount);
            match price {
                Some(price) => Some(Competitor { name, price }),
                None => {
                    tracing::debug!(%name, "dropping competitor without a usable price");
                    None
                }
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_object_is_flattened_in_order() {
        let content: GeneratedContent = serde_json::from_value(json!({
            "productTitle": "T",
            "productAttributes": { "RAM": "8GB", "CPU": "i5" },
            "pricingAnalysis": {}
        }))
        .unwrap();
        assert_eq!(content.product_attributes, "RAM: 8GB\nCPU: i5");
    }

    #[test]
    fn attributes_string_is_kept() {
        let content: GeneratedContent = serde_json::from_value(json!({
            "productAttributes": "CPU: i5\nRAM: 8GB",
            "pricingAnalysis": {}
        }))
        .unwrap();
        assert_eq!(content.product_attributes, "CPU: i5\nRAM: 8GB");
    }

    #[test]
    fn numeric_fields_accept_strings_and_nulls() {
        let analysis: PricingAnalysis = serde_json::from_value(json!({
            "lowestCompetitorPrice": "R 5 150.00",
            "highestCompetitorPrice": 5500,
            "averageCompetitorPrice": null,
            "suggestedPrice": "unknown",
            "margin": 12.5
        }))
        .unwrap();
        assert_eq!(analysis.lowest_competitor_price, Some(5150.0));
        assert_eq!(analysis.highest_competitor_price, Some(5500.0));
        assert_eq!(analysis.average_competitor_price, None);
        assert_eq!(analysis.suggested_price, None);
        assert_eq!(analysis.margin, Some(12.5));
        assert_eq!(analysis.profit, None);
    }

    #[test]
    fn competitors_without_price_are_dropped() {
        let analysis: PricingAnalysis = serde_json::from_value(json!({
            "competitors": [
                { "name": "Takealot", "price": 5500 },
                { "name": "Mystery" },
                { "name": "Evetech", "price": "5150" },
                { "price": 10 }
            ]
        }))
        .unwrap();
        assert_eq!(
            analysis.competitors,
            vec![
                Competitor::new("Takealot", 5500.0),
                Competitor::new("Evetech", 5150.0)
            ]
        );
    }

    #[test]
    fn non_string_text_is_stringified() {
        let content: GeneratedContent = serde_json::from_value(json!({
            "productTitle": 42,
            "productTags": null,
            "pricingAnalysis": { "rationale": true }
        }))
        .unwrap();
        assert_eq!(content.product_title, "42");
        assert_eq!(content.product_tags, "");
        assert_eq!(content.pricing_analysis.rationale, "true");
    }
}
