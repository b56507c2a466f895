//! Checks that must pass before a generation request is sent.

use std::fmt;

use thiserror::Error;

use crate::messages;
use crate::pricing::parse_numeric;
use crate::product::{CompetitorInput, ProductInput};

/// The form field an error belongs to. Competitor rows are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    CompetitorName(usize),
    CompetitorPrice(usize),
    CostPrice,
    AutofillQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Empty,
    NotNumeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: InputField,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.field, self.problem) {
            (InputField::CompetitorName(i), _) => {
                write!(f, "Competitor {} name is required", i + 1)
            }
            (InputField::CompetitorPrice(i), FieldProblem::Empty) => {
                write!(f, "Competitor {} price is required", i + 1)
            }
            (InputField::CompetitorPrice(i), FieldProblem::NotNumeric) => {
                write!(f, "Competitor {} price must be a number", i + 1)
            }
            (InputField::CostPrice, _) => write!(f, "Cost price must be a number"),
            (InputField::AutofillQuery, _) => f.write_str(messages::AUTOFILL_QUERY_REQUIRED),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} field(s) need attention", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Errors attached to a single field, for inline display.
    pub fn for_field(&self, field: InputField) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }
}

pub fn validate_competitor(index: usize, competitor: &CompetitorInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if competitor.name.trim().is_empty() {
        errors.push(FieldError {
            field: InputField::CompetitorName(index),
            problem: FieldProblem::Empty,
        });
    }
    let price = competitor.price.trim();
    if price.is_empty() {
        errors.push(FieldError {
            field: InputField::CompetitorPrice(index),
            problem: FieldProblem::Empty,
        });
    } else if parse_numeric(price).is_none() {
        errors.push(FieldError {
            field: InputField::CompetitorPrice(index),
            problem: FieldProblem::NotNumeric,
        });
    }
    errors
}

/// An auto-fill lookup needs a URL or model number.
pub fn validate_autofill_query(query: &str) -> Result<(), ValidationErrors> {
    if query.trim().is_empty() {
        return Err(ValidationErrors(vec![FieldError {
            field: InputField::AutofillQuery,
            problem: FieldProblem::Empty,
        }]));
    }
    Ok(())
}

pub fn validate_input(input: &ProductInput) -> Result<(), ValidationErrors> {
    let mut errors: Vec<FieldError> = input
        .competitors
        .iter()
        .enumerate()
        .flat_map(|(i, c)| validate_competitor(i, c))
        .collect();

    if let Some(cost) = input.cost_price_text() {
        if parse_numeric(cost).is_none() {
            errors.push(FieldError {
                field: InputField::CostPrice,
                problem: FieldProblem::NotNumeric,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "product input failed validation");
        Err(ValidationErrors(errors))
    }
}
