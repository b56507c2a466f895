//! Per-user working state: the product being edited, the saved slot, and the
//! generation and auto-fill request lifecycles.
//!
//! Each request is tagged with a [`Ticket`]. Beginning a new request
//! supersedes the previous one; a result that arrives for a superseded ticket
//! is dropped so stale content is never shown.

use tracing::{debug, info, warn};

use crate::ai::{self, AiConfig};
use crate::autofill::AutofillProposal;
use crate::content::GeneratedContent;
use crate::error::{GenerationError, StorageError};
use crate::product::{ImageAttachment, ProductInput};
use crate::store::{self, KeyValueStore};
use crate::validation::{validate_autofill_query, validate_input, FieldError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub enum GenerationState {
    Idle,
    Requesting { ticket: Ticket },
    Succeeded(GeneratedContent),
    Failed(GenerationError),
}

#[derive(Debug)]
pub enum AutofillState {
    Idle,
    Requesting { ticket: Ticket },
    Proposed(AutofillProposal),
    Failed(GenerationError),
}

/// Snapshot handed to whoever performs the network call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub ticket: Ticket,
    pub input: ProductInput,
}

#[derive(Debug, Clone)]
pub struct AutofillRequest {
    pub ticket: Ticket,
    pub query: String,
}

pub struct Session<S: KeyValueStore> {
    input: ProductInput,
    store: S,
    field_errors: Vec<FieldError>,
    generation: GenerationState,
    autofill: AutofillState,
    next_ticket: u64,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self::with_input(store, ProductInput::default())
    }

    pub fn with_input(store: S, input: ProductInput) -> Self {
        Self {
            input,
            store,
            field_errors: Vec::new(),
            generation: GenerationState::Idle,
            autofill: AutofillState::Idle,
            next_ticket: 0,
        }
    }

    pub fn input(&self) -> &ProductInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut ProductInput {
        &mut self.input
    }

    pub fn set_image(&mut self, image: ImageAttachment) {
        self.input.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.input.image = None;
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    pub fn autofill_state(&self) -> &AutofillState {
        &self.autofill
    }

    /// Content from the last successful generation, if it is still current.
    pub fn content(&self) -> Option<&GeneratedContent> {
        match &self.generation {
            GenerationState::Succeeded(content) => Some(content),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.generation, GenerationState::Requesting { .. })
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Validates the input and moves to `Requesting`.
    ///
    /// Validation failures are kept for inline display and nothing is sent.
    /// Any in-flight request is retired and the state returns to `Idle`.
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, ValidationErrors> {
        if let Err(errors) = validate_input(&self.input) {
            self.field_errors = errors.errors().to_vec();
            if let GenerationState::Requesting { ticket } = self.generation {
                debug!(?ticket, "retiring in-flight generation after failed validation");
            }
            self.generation = GenerationState::Idle;
            return Err(errors);
        }
        self.field_errors.clear();

        if let GenerationState::Requesting { ticket } = self.generation {
            debug!(?ticket, "superseding in-flight generation");
        }
        let ticket = self.issue_ticket();
        self.generation = GenerationState::Requesting { ticket };
        Ok(GenerationRequest {
            ticket,
            input: self.input.clone(),
        })
    }

    /// Records a result. Returns `false` if `ticket` was superseded.
    pub fn finish_generation(
        &mut self,
        ticket: Ticket,
        result: Result<GeneratedContent, GenerationError>,
    ) -> bool {
        match self.generation {
            GenerationState::Requesting { ticket: current } if current == ticket => {}
            _ => {
                warn!(?ticket, "discarding stale generation result");
                return false;
            }
        }
        self.generation = match result {
            Ok(content) => {
                info!(title = %content.product_title, "content generated");
                GenerationState::Succeeded(content)
            }
            Err(err) => {
                warn!(error = %err, "content generation failed");
                GenerationState::Failed(err)
            }
        };
        true
    }

    /// Validates, calls the model and records the outcome.
    pub async fn generate(&mut self, config: &AiConfig) -> &GenerationState {
        match self.begin_generation() {
            Ok(request) => {
                let result = ai::generate_product_content(config, &request.input).await;
                self.finish_generation(request.ticket, result);
            }
            Err(errors) => {
                debug!(count = errors.errors().len(), "generation blocked by validation");
            }
        }
        &self.generation
    }

    /// Returns a finished generation to `Idle`. In-flight requests are kept.
    pub fn reset_to_idle(&mut self) {
        if !self.is_generating() {
            self.generation = GenerationState::Idle;
        }
    }

    pub fn begin_autofill(&mut self, query: &str) -> Result<AutofillRequest, GenerationError> {
        validate_autofill_query(query)?;
        let query = query.trim();
        let ticket = self.issue_ticket();
        self.autofill = AutofillState::Requesting { ticket };
        Ok(AutofillRequest {
            ticket,
            query: query.to_string(),
        })
    }

    pub fn finish_autofill(
        &mut self,
        ticket: Ticket,
        result: Result<AutofillProposal, GenerationError>,
    ) -> bool {
        match self.autofill {
            AutofillState::Requesting { ticket: current } if current == ticket => {}
            _ => {
                warn!(?ticket, "discarding stale auto-fill result");
                return false;
            }
        }
        self.autofill = match result {
            Ok(proposal) => {
                info!(
                    missing = ?proposal.missing_fields(),
                    "{}",
                    proposal.confidence_summary()
                );
                AutofillState::Proposed(proposal)
            }
            Err(err) => {
                warn!(error = %err, "spec auto-fill failed");
                AutofillState::Failed(err)
            }
        };
        true
    }

    pub async fn autofill(&mut self, config: &AiConfig, query: &str) -> &AutofillState {
        match self.begin_autofill(query) {
            Ok(request) => {
                let result = ai::request_spec_autofill(config, &request.query).await;
                self.finish_autofill(request.ticket, result);
            }
            Err(err) => self.autofill = AutofillState::Failed(err),
        }
        &self.autofill
    }

    pub fn pending_proposal(&self) -> Option<&AutofillProposal> {
        match &self.autofill {
            AutofillState::Proposed(proposal) => Some(proposal),
            _ => None,
        }
    }

    /// Applies the pending proposal after the user confirmed it.
    pub fn apply_autofill(&mut self) -> Option<usize> {
        if !matches!(self.autofill, AutofillState::Proposed(_)) {
            return None;
        }
        match std::mem::replace(&mut self.autofill, AutofillState::Idle) {
            AutofillState::Proposed(proposal) => {
                Some(proposal.apply_to(&mut self.input.oem_label_data))
            }
            _ => None,
        }
    }

    pub fn discard_autofill(&mut self) {
        if !matches!(self.autofill, AutofillState::Requesting { .. }) {
            self.autofill = AutofillState::Idle;
        }
    }

    pub fn has_saved_product(&self) -> Result<bool, StorageError> {
        store::has_saved_product(&self.store)
    }

    pub fn save_product(&mut self) -> Result<(), StorageError> {
        store::save_product(&mut self.store, &self.input)
    }

    /// Replaces the working input with the saved one.
    ///
    /// Returns `Ok(false)` when nothing was saved. On error the current input
    /// is left untouched.
    pub fn load_product(&mut self) -> Result<bool, StorageError> {
        match store::load_product(&self.store)? {
            Some(input) => {
                self.input = input;
                self.field_errors.clear();
                info!("loaded saved product data");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
