//! Lead Dialog State Machine
//!
//! Drives the two-step dialog: field edits, validation gates, the step 2
//! countdown and the single relay submission.

use crate::contract::{LeadTransport, RelayReply};
use crate::countdown::Countdown;
use crate::error::Result;
use crate::lead::{Bonus, LeadForm, LeadSubmission, Sector};
use crate::phone::{format_phone, normalize_phone};
use crate::validation::{validate, FormErrors, FormField, Step};

/// Shown when the relay fails without saying why
pub const GENERIC_FAILURE: &str = "An unknown error occurred.";

/// Shown when the relay succeeds but sends no URL
pub const MISSING_REDIRECT: &str = "Missing redirect URL.";

/// Which flavour of the dialog is on the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowVariant {
    /// No bonus; closing the dialog keeps everything as is
    Simple,
    /// A bonus must be picked before submitting
    #[default]
    Bonus,
}

/// Where the dialog is
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WizardState {
    /// Editing contact details
    #[default]
    Step1Entry,
    /// Contact details checked and valid
    Step1Valid,
    /// On the offer step, nothing sent yet
    Step2Entry,
    /// Waiting for the relay
    Submitting,
    /// Terminal: the browser is leaving for the provider
    Redirecting { purchase_url: String },
    /// Back on step 2 with a general error
    Failed,
}

impl WizardState {
    pub const fn step(&self) -> Step {
        match self {
            Self::Step1Entry | Self::Step1Valid => Step::One,
            _ => Step::Two,
        }
    }

    /// Edits and navigation are locked
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Submitting | Self::Redirecting { .. })
    }
}

/// The lead dialog
#[derive(Clone, Debug, Default)]
pub struct LeadWizard {
    variant: FlowVariant,
    state: WizardState,
    form: LeadForm,
    errors: FormErrors,
    bonus: Option<Bonus>,
    countdown: Countdown,
}

impl LeadWizard {
    pub fn new(variant: FlowVariant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub const fn variant(&self) -> FlowVariant {
        self.variant
    }

    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    pub const fn step(&self) -> Step {
        self.state.step()
    }

    pub const fn form(&self) -> &LeadForm {
        &self.form
    }

    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(field)
    }

    pub const fn bonus(&self) -> Option<Bonus> {
        self.bonus
    }

    pub const fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub const fn is_submitting(&self) -> bool {
        matches!(self.state, WizardState::Submitting)
    }

    /// Phone as displayed in the input
    pub fn formatted_phone(&self) -> String {
        format_phone(&self.form.phone)
    }

    /// Set when the dialog has handed off to the provider
    pub fn purchase_url(&self) -> Option<&str> {
        match &self.state {
            WizardState::Redirecting { purchase_url } => Some(purchase_url),
            _ => None,
        }
    }

    /// Record a user edit and clear that field's error
    ///
    /// Phone input is reduced to digits; an unknown sector value unsets the
    /// sector.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        if self.state.is_locked() {
            return;
        }

        match field {
            FormField::CompanyName => self.form.company_name = value.to_string(),
            FormField::FullName => self.form.full_name = value.to_string(),
            FormField::Email => self.form.email = value.to_string(),
            FormField::Phone => self.form.phone = normalize_phone(value),
            FormField::Sector => self.form.sector = value.parse().ok(),
            FormField::SocialLink => self.form.social_link = value.to_string(),
            FormField::General => return,
        }

        self.errors.clear_field(field);
        if self.state == WizardState::Step1Valid {
            self.state = WizardState::Step1Entry;
        }
    }

    pub fn select_sector(&mut self, sector: Option<Sector>) {
        if self.state.is_locked() {
            return;
        }

        self.form.sector = sector;
        self.errors.clear_field(FormField::Sector);
    }

    pub fn select_bonus(&mut self, bonus: Bonus) {
        if !self.state.is_locked() {
            self.bonus = Some(bonus);
        }
    }

    /// Validate step 1 without moving
    pub fn check_step1(&mut self) -> bool {
        if self.step() != Step::One {
            return false;
        }

        self.errors = validate(Step::One, &self.form);
        let valid = self.errors.is_empty();
        self.state = if valid {
            WizardState::Step1Valid
        } else {
            WizardState::Step1Entry
        };
        valid
    }

    /// Step 1 → 2 when the contact details pass
    pub fn advance(&mut self) -> bool {
        if !self.check_step1() {
            tracing::debug!(errors = self.errors.len(), "Step 1 rejected");
            return false;
        }

        self.errors.clear();
        self.countdown = Countdown::default();
        self.state = WizardState::Step2Entry;
        true
    }

    /// Whether the submit control is enabled
    pub const fn can_submit(&self) -> bool {
        let state_ok = matches!(self.state, WizardState::Step2Entry | WizardState::Failed);
        let bonus_ok = match self.variant {
            FlowVariant::Simple => true,
            FlowVariant::Bonus => self.bonus.is_some(),
        };
        state_ok && bonus_ok
    }

    /// Enter `Submitting` and hand back the payload to send
    ///
    /// `None` when submitting is not allowed right now; nothing must be sent.
    pub fn begin_submit(&mut self) -> Option<LeadSubmission> {
        if !self.can_submit() {
            return None;
        }

        let errors = validate(Step::Two, &self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }

        self.errors.clear();
        self.state = WizardState::Submitting;
        Some(self.form.to_submission())
    }

    /// Apply the relay outcome of the submission in flight
    pub fn finish_submit(&mut self, reply: Result<RelayReply>) -> &WizardState {
        if !self.is_submitting() {
            return &self.state;
        }

        let failure = match reply {
            Ok(RelayReply::Success { purchase_url: Some(purchase_url) }) => {
                self.state = WizardState::Redirecting { purchase_url };
                return &self.state;
            }
            Ok(RelayReply::Success { purchase_url: None }) => MISSING_REDIRECT.to_string(),
            Ok(RelayReply::Failure { error, .. }) => {
                error.unwrap_or_else(|| GENERIC_FAILURE.to_string())
            }
            Err(e) => {
                tracing::warn!("Lead submission failed: {}", e);
                e.user_message()
            }
        };

        self.errors = FormErrors::general(failure);
        self.state = WizardState::Failed;
        &self.state
    }

    /// Submit through `transport`, at most one request
    pub async fn submit<T>(&mut self, transport: &T) -> &WizardState
    where
        T: LeadTransport + ?Sized,
    {
        let Some(submission) = self.begin_submit() else {
            return &self.state;
        };

        let reply = transport.send(&submission).await;
        self.finish_submit(reply)
    }

    /// One second elapsed; only counts on step 2
    pub fn tick(&mut self) {
        if matches!(
            self.state,
            WizardState::Step2Entry | WizardState::Submitting | WizardState::Failed
        ) {
            self.countdown.tick();
        }
    }

    /// Dialog dismissed
    ///
    /// Back to step 1 with errors cleared; field values survive. The simple
    /// flow keeps its state entirely.
    pub fn close(&mut self) {
        if self.variant == FlowVariant::Simple || self.state.is_locked() {
            return;
        }

        self.state = WizardState::Step1Entry;
        self.errors.clear();
    }
}
