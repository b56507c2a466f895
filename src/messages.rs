//! Shared user-facing text.
//!
//! Keep every string the view layer shows in this module so they stay in one
//! place and are easy to update or translate.

pub const GENERATION_FAILED: &str = "An unexpected error occurred while generating content.";
pub const NO_JSON_FOUND: &str =
    "The AI did not return any content we could read. Please try again.";
pub const MALFORMED_JSON: &str = "Failed to parse the AI's response. The format was invalid.";
pub const MISSING_FIELDS: &str = "Generated content is missing required fields.";
pub const UNEXPECTED_SHAPE: &str = "The AI's response did not match the expected structure.";
pub const FIX_HIGHLIGHTED_FIELDS: &str = "Please fix the highlighted fields before generating.";

pub const LOAD_CORRUPTED: &str = "Could not load product data. It may be corrupted.";
pub const LOAD_FAILED: &str = "Could not load product data.";
pub const SAVE_FAILED: &str = "Could not save product data.";
pub const NOTHING_SAVED: &str = "There is no saved product to load.";

pub const AUTOFILL_QUERY_REQUIRED: &str = "Enter a product URL or model number to auto-fill.";

pub const NOT_AVAILABLE: &str = "N/A";

pub fn confidence_text(score: u8, found: usize, total: usize) -> String {
    format!("Confidence Score: {score}% ({found} of {total} fields found)")
}

pub fn error_banner(message: &str) -> String {
    format!("An error occurred: {message}")
}
