use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

/// Splits a comma-separated field into trimmed, non-empty entries.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shortens `text` to at most `max` graphemes plus `"..."`, cutting at the
/// last space inside the limit when there is one.
pub fn truncate_text(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let head = &graphemes[..max];
    let cut = head
        .iter()
        .rposition(|g| *g == " ")
        .filter(|&i| i > 0)
        .unwrap_or(max);
    let result = format!("{}...", head[..cut].concat());
    trace!(max, original = graphemes.len(), "truncated text");
    result
}
