use serde_json::{json, Value};

use crate::product::{CompetitorInput, ProductInput};

/// A filled-in product form with two competitors.
pub fn sample_input() -> ProductInput {
    let mut input = ProductInput::default();
    input.oem_label_data.brand = "Lenovo".into();
    input.oem_label_data.model_name = "E51-80".into();
    input.oem_label_data.cpu = "Intel Core i5-6200U".into();
    input.oem_label_data.ram = "8GB".into();
    input.oem_label_data.storage = "256GB SSD".into();
    input.price = "4999".into();
    input.competitors = vec![
        CompetitorInput::new("Takealot", "5500"),
        CompetitorInput::new("Evetech", "5150"),
    ];
    input
}

/// A `generateContent` response envelope carrying `text`.
pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

/// A complete content package as the model would send it.
pub fn content_json() -> Value {
    json!({
        "productTitle": "Refurbished Lenovo E51-80 Intel Core i5-6200U 8GB 256GB SSD",
        "seoKeyPhrase": "Refurbished Lenovo E51-80",
        "urlSlug": "refurbished-lenovo-e51-80",
        "longDescriptionHtml": "<p>Reliable.</p>",
        "shortDescriptionHtml": "<h4>Specifications:</h4>",
        "metaDescription": "Buy a refurbished Lenovo E51-80 in Benoni. Tested, with warranty. Shop now!",
        "productAttributes": "CPU: Intel Core i5-6200U\nRAM: 8GB",
        "productTags": "Lenovo, E51-80, refurbished",
        "pricingAnalysis": {
            "lowestCompetitorPrice": 5150,
            "highestCompetitorPrice": 5500,
            "averageCompetitorPrice": 5325,
            "marketPositioning": "Lower than the market",
            "suggestedPrice": 5199,
            "recommendation": "Hold price: we are in line with the market average.",
            "rationale": "Warranty and testing justify a price near the average.",
            "competitors": [
                { "name": "Takealot", "price": 5500 },
                { "name": "Evetech", "price": 5150 }
            ]
        }
    })
}
