//! Fixed prompt fragments sent to the generative model.
//!
//! Centralizing these strings makes it easy to tweak tone, schema and rules
//! without digging through the request builders. The schema here is a
//! contract: [`crate::content::GeneratedContent`] reads exactly these keys.

pub const PERSONA: &str = "**Persona:** Act as a knowledgeable and trustworthy tech marketing specialist for TechRestored.co.za. The tone should be professional, clear, and persuasive, focusing on value, reliability, and local South African service. Emphasize quality and performance for the target audience.";

pub const JSON_ONLY: &str = "**Core Instructions & Workflow:**\nBased on the provided product data, generate a complete SEO-optimized content package. Your entire response MUST be a single, valid JSON object, with no markdown formatting, code fences, or text outside the JSON.";

pub const OUTPUT_SCHEMA: &str = r#"**Expected JSON Structure:**
{
  "productTitle": "string",
  "seoKeyPhrase": "string",
  "urlSlug": "string",
  "longDescriptionHtml": "string (300-500 words, clean HTML with <h2>, <h3>, <p>, <ul>, <li>, <strong> tags)",
  "shortDescriptionHtml": "string (clean HTML snippet as per instructions)",
  "metaDescription": "string (155-160 characters)",
  "productAttributes": "string (one 'Key: Value' pair per line, lines separated by \n)",
  "productTags": "string (comma-separated)",
  "pricingAnalysis": {
    "lowestCompetitorPrice": "number or null",
    "highestCompetitorPrice": "number or null",
    "averageCompetitorPrice": "number or null",
    "marketPositioning": "string",
    "suggestedPrice": "number or null",
    "priceGap": "number or null",
    "recommendation": "string",
    "profit": "number or null",
    "margin": "number or null (percent)",
    "rationale": "string (2-3 sentences)",
    "competitors": [{ "name": "string", "price": "number" }]
  }
}"#;

pub const SANITIZATION_RULE: &str = "**Content Sanitization:** When generating user-facing content (like titles, descriptions, tags), do not include specific condition grades (e.g., 'Grade A'). Refer to the condition simply as 'Refurbished' or 'Certified Refurbished' as appropriate for the context.";

pub const IMAGE_ATTACHED: &str = "-   An image of the OEM label is attached. **You must use it as the primary source of truth for all OEM specifications** (brand, model, MTM, CPU, RAM, storage, etc.). Perform OCR to extract this data.\n    -   The 'Product Data to Use' JSON below provides supplementary information (like condition, price, audience) and is the **fallback for any OEM data you cannot find in the image**.\n    -   If there is a conflict between the image and the JSON for an OEM spec, **the data from the image always wins**.";

pub const NO_IMAGE: &str = "-   No label image is attached. **The 'Product Data to Use' JSON below is the sole, authoritative source** for all OEM specifications and supplementary information.";

pub const TITLE_TEMPLATE: &str = "Refurbished [Brand] [Model] [CPU] [RAM] [Storage]";

pub const KEY_PHRASE_TEMPLATE: &str = "Refurbished [Brand] [Model]";

pub const SHORT_DESCRIPTION_TEMPLATE: &str = r#"<div class="headline">[One-sentence summary]</div><h4>Specifications:</h4><ul><li><div class="col-4">CPU: [CPU]</div></li><li>Gen: [CPU Generation]</li><li>Memory: [RAM]</li><li>Drive: [Storage]</li><li>Screen Size: [Display]</li><li>OS: [OS]</li><li>Webcam: [Webcam]</li><li>GPU: [GPU]</li></ul>"#;

pub const LONG_DESCRIPTION_RULES: &str = "Write a 300-500 word description.\n        -   <h2>: Engaging, benefit-oriented headline.\n        -   <p>: Hook the reader, address the target audience.\n        -   <h3>: \"Core Performance for Everyday Success\"\n        -   <p>: Detail CPU, RAM, SSD and their benefits. Use <strong>.\n        -   <h3>: \"Quality You Can Trust\"\n        -   <p>: Explain \"Certified Refurbished\", mention meticulous testing and the 'local South African warranty'.\n        -   <h3>: \"Why Choose This Laptop from TechRestored?\"\n        -   <ul><li>: List the USPs. Weave in location and local SEO tags.\n        -   <p>: Strong closing with a call-to-action.";

/// Auto-fill lookup. `{query}` is replaced with the user's URL or model number.
pub const AUTOFILL_PROMPT: &str = r#"You are a laptop specification researcher. Use Google Search to find the manufacturer specifications for the product identified by the following URL or model number:

{query}

Respond with a single JSON object and nothing else, using exactly these keys (all values are strings):
{
  "model_name": "",
  "brand": "",
  "mtm": "",
  "cpu": "",
  "ram": "",
  "storage": "",
  "display": "",
  "os": "",
  "gpu": "",
  "webcam": "",
  "resolution": "",
  "color": ""
}
Use an empty string for any value you cannot confirm. Do not guess."#;
