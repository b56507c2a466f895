//! Label specs proposed by the auto-fill lookup, pending user confirmation.

use crate::product::OemLabelData;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutofillProposal {
    pub specs: OemLabelData,
}

impl AutofillProposal {
    pub fn new(specs: OemLabelData) -> Self {
        Self { specs }
    }

    pub fn total_count(&self) -> usize {
        OemLabelData::FIELD_NAMES.len()
    }

    pub fn found_count(&self) -> usize {
        self.specs
            .fields()
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .count()
    }

    /// Share of fields found, as a whole percent.
    pub fn confidence(&self) -> u8 {
        let total = self.total_count();
        if total == 0 {
            return 0;
        }
        (self.found_count() as f64 / total as f64 * 100.0).round() as u8
    }

    /// e.g. `Confidence Score: 50% (6 of 12 fields found)`.
    pub fn confidence_summary(&self) -> String {
        crate::messages::confidence_text(self.confidence(), self.found_count(), self.total_count())
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.specs
            .fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    /// Copies every non-empty proposed value into `target`.
    pub fn apply_to(&self, target: &mut OemLabelData) -> usize {
        let mut applied = 0;
        for (key, value) in self.specs.fields() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if let Some(slot) = target.get_mut(key) {
                *slot = value.to_string();
                applied += 1;
            }
        }
        tracing::debug!(applied, "applied auto-fill proposal");
        applied
    }
}
