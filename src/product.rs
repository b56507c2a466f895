//! Product data collected from the user.
//!
//! Everything here is free text exactly as typed. Numeric checks happen in
//! [`crate::validation`] right before a generation request is built.

use std::path::Path;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Manufacturer label specs, typed by hand or read from a label photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OemLabelData {
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub mtm: String,
    #[serde(default)]
    pub cpu: String,
    #[serde(default)]
    pub ram: String,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub gpu: String,
    #[serde(default)]
    pub webcam: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub color: String,
}

impl OemLabelData {
    /// Wire keys of every label field, in display order.
    pub const FIELD_NAMES: [&'static str; 12] = [
        "model_name",
        "brand",
        "mtm",
        "cpu",
        "ram",
        "storage",
        "display",
        "os",
        "gpu",
        "webcam",
        "resolution",
        "color",
    ];

    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "model_name" => &self.model_name,
            "brand" => &self.brand,
            "mtm" => &self.mtm,
            "cpu" => &self.cpu,
            "ram" => &self.ram,
            "storage" => &self.storage,
            "display" => &self.display,
            "os" => &self.os,
            "gpu" => &self.gpu,
            "webcam" => &self.webcam,
            "resolution" => &self.resolution,
            "color" => &self.color,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        let value = match key {
            "model_name" => &mut self.model_name,
            "brand" => &mut self.brand,
            "mtm" => &mut self.mtm,
            "cpu" => &mut self.cpu,
            "ram" => &mut self.ram,
            "storage" => &mut self.storage,
            "display" => &mut self.display,
            "os" => &mut self.os,
            "gpu" => &mut self.gpu,
            "webcam" => &mut self.webcam,
            "resolution" => &mut self.resolution,
            "color" => &mut self.color,
            _ => return None,
        };
        Some(value)
    }

    /// All fields as `(key, value)` pairs in [`Self::FIELD_NAMES`] order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        Self::FIELD_NAMES
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

impl CompetitorInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }
}

/// A label photo attached to the next generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads an image file, guessing the mime type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let mime_type = match extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            _ => "application/octet-stream",
        };
        tracing::debug!(path = %path.display(), mime_type, size = bytes.len(), "loaded label image");
        Ok(Self::new(mime_type, bytes))
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// The working product record edited during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Binary payloads are never persisted.
    #[serde(skip)]
    pub image: Option<ImageAttachment>,
    #[serde(default)]
    pub oem_label_data: OemLabelData,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub usp: String,
    #[serde(default)]
    pub price: String,
    #[serde(
        rename = "costPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_price: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub local_seo_tags: String,
    #[serde(default)]
    pub competitors: Vec<CompetitorInput>,
}

impl Default for ProductInput {
    fn default() -> Self {
        Self {
            image: None,
            oem_label_data: OemLabelData::default(),
            condition: "Refurbished".to_string(),
            target_audience: "Professionals, Students, Small Business Owners".to_string(),
            usp: "Dependable performance, Durable build, Affordable price, Local South African warranty"
                .to_string(),
            price: String::new(),
            cost_price: None,
            location: "Benoni, Gauteng".to_string(),
            local_seo_tags:
                "Benoni laptop deals, Gauteng refurbished laptops, South Africa tech store"
                    .to_string(),
            competitors: Vec::new(),
        }
    }
}

impl ProductInput {
    pub fn add_competitor(&mut self, competitor: CompetitorInput) {
        self.competitors.push(competitor);
    }

    /// Replaces the row at `index`. Returns `false` if there is no such row.
    pub fn update_competitor(&mut self, index: usize, competitor: CompetitorInput) -> bool {
        match self.competitors.get_mut(index) {
            Some(slot) => {
                *slot = competitor;
                true
            }
            None => false,
        }
    }

    /// Removes the row at `index`, keeping the order of the others.
    pub fn remove_competitor(&mut self, index: usize) -> bool {
        if index < self.competitors.len() {
            self.competitors.remove(index);
            true
        } else {
            false
        }
    }

    /// Cost price if one was typed, trimmed.
    pub fn cost_price_text(&self) -> Option<&str> {
        self.cost_price
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
