use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::ai::common::{generate_content_url, request_text};
use crate::ai::config::AiConfig;
use crate::ai::prompts::*;
use crate::content::GeneratedContent;
use crate::error::GenerationError;
use crate::interpret::interpret_generated_content;
use crate::pricing::{competitor_pricing_string, Recommendation, PRICE_GAP_THRESHOLD};
use crate::product::{OemLabelData, ProductInput};

/// Product data as embedded in the prompt.
#[derive(Serialize)]
struct PromptData<'a> {
    oem_label_data: &'a OemLabelData,
    condition: &'a str,
    target_audience: &'a str,
    usp: &'a str,
    price: &'a str,
    #[serde(rename = "costPrice", skip_serializing_if = "Option::is_none")]
    cost_price: Option<&'a str>,
    location: &'a str,
    local_seo_tags: &'a str,
    competitor_pricing_data: String,
}

impl<'a> From<&'a ProductInput> for PromptData<'a> {
    fn from(input: &'a ProductInput) -> Self {
        Self {
            oem_label_data: &input.oem_label_data,
            condition: &input.condition,
            target_audience: &input.target_audience,
            usp: &input.usp,
            price: &input.price,
            cost_price: input.cost_price_text(),
            location: &input.location,
            local_seo_tags: &input.local_seo_tags,
            competitor_pricing_data: competitor_pricing_string(&input.competitors),
        }
    }
}

fn pricing_rules(has_cost_price: bool) -> String {
    let threshold = PRICE_GAP_THRESHOLD;
    let cost_rule = if has_cost_price {
        "-   A 'costPrice' is supplied. Set 'profit' = suggestedPrice - costPrice and 'margin' = profit / suggestedPrice * 100."
    } else {
        "-   No 'costPrice' is supplied. Set 'profit' and 'margin' to null."
    };
    format!(
        "**Pricing Analysis & Recommendation:**\n\
        -   The 'competitor_pricing_data' field is a string containing comma-separated pairs, e.g., \"Takealot: 5500, Evetech: 5150\".\n\
        -   Parse this string to identify each competitor and their price, and populate the 'competitors' array with these parsed pairs.\n\
        -   Calculate the lowest, highest, and average competitor price. Use null for any value you cannot calculate; never use 0 as a placeholder.\n\
        -   State in 'marketPositioning' whether our price is lower, higher, or in line with the market.\n\
        -   Justify a 'suggestedPrice' based on our value proposition (warranty, testing, USPs).\n\
        -   Set 'priceGap' = suggestedPrice - averageCompetitorPrice.\n\
        -   Set 'recommendation' by the gap: below -{threshold} use exactly \"{increase}\"; above {threshold} use exactly \"{lower}\"; otherwise use exactly \"{hold}\".\n\
        {cost_rule}\n\
        -   Provide a concise 'rationale'.",
        increase = Recommendation::IncreasePrice.guidance(),
        lower = Recommendation::LowerPrice.guidance(),
        hold = Recommendation::Hold.guidance(),
    )
}

/// Builds the full instruction document for a content request.
pub fn build_prompt(input: &ProductInput) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(&PromptData::from(input))?;
    let source_rules = if input.image.is_some() {
        IMAGE_ATTACHED
    } else {
        NO_IMAGE
    };

    Ok(format!(
        "{PERSONA}\n\n\
        {JSON_ONLY}\n\n\
        {OUTPUT_SCHEMA}\n\n\
        **Detailed Content Generation Rules:**\n\n\
        {SANITIZATION_RULE}\n\n\
        1.  **Analyze Input:**\n    {source_rules}\n\
        2.  **Product Title:** Format: \"{TITLE_TEMPLATE}\"\n\
        3.  **SEO KeyPhrase:** Format: \"{KEY_PHRASE_TEMPLATE}\"\n\
        4.  **URL Slug:** Generate a clean, lowercase, hyphenated slug from the KeyPhrase.\n\
        5.  **Long Description (HTML):** {LONG_DESCRIPTION_RULES}\n\
        6.  **Short Description (HTML):** Use this exact HTML structure, populating it with specs:\n    `{SHORT_DESCRIPTION_TEMPLATE}`\n\
        7.  **Meta Description:** 155-160 characters. Must include KeyPhrase, a key benefit, and a CTA.\n\
        8.  **Product Attributes:** One 'Key: Value' line per main spec.\n\
        9.  **Product Tags:** Comma-separated list: brand, model, specs, condition, location tags, MTM.\n\
        10. {pricing}\n\n\
        **Product Data to Use:**\n```json\n{data}\n```\n",
        pricing = pricing_rules(input.cost_price_text().is_some()),
    ))
}

/// Builds the `generateContent` body. The label image, if any, goes first.
pub fn build_request_body(input: &ProductInput) -> Result<Value, serde_json::Error> {
    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &input.image {
        parts.push(json!({
            "inlineData": { "mimeType": image.mime_type, "data": image.to_base64() }
        }));
    }
    parts.push(json!({ "text": build_prompt(input)? }));

    Ok(json!({
        "contents": [ { "role": "user", "parts": parts } ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "thinkingConfig": { "thinkingBudget": 0 }
        }
    }))
}

/// Requests a content package for `input` and validates the reply.
///
/// Input validation is the caller's job; see [`crate::validation`].
#[instrument(level = "trace", skip(config, input))]
pub async fn generate_product_content(
    config: &AiConfig,
    input: &ProductInput,
) -> Result<GeneratedContent, GenerationError> {
    let body = build_request_body(input).map_err(GenerationError::Envelope)?;
    let url = generate_content_url(&config.api_base, &config.model);
    debug!(
        model = %config.model,
        with_image = input.image.is_some(),
        competitors = input.competitors.len(),
        "requesting product content"
    );

    let text = request_text(&config.api_key, &url, &body).await?;
    let mut content = interpret_generated_content(&text)?;
    content.derive_pricing(input);
    Ok(content)
}
