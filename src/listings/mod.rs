//! Listings
//!
//! A seller builds a [`ListingDraft`] across four ordered steps. The [`ListingWizard`] gates
//! forward navigation on the current step's checks and assembles a [`Listing`] for the
//! submission collaborator once everything holds and the terms have been accepted.

use std::{fmt, str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{AUD, Currency},
};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    categories::Category,
    conditions::Condition,
    fixtures::products::to_minor_units,
    limits::{MAX_DESCRIPTION_LENGTH, MAX_IMAGES, MAX_TAGS, MAX_TITLE_LENGTH},
    tags::Tags,
};

pub mod images;

pub use images::{DraftImage, ImageKey, ImageUpload, InMemoryPreviews, PreviewHandle, PreviewRegistry};

/// Errors editing a draft
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    /// The draft already holds the maximum number of images
    #[error("a listing can have at most 5 images")]
    TooManyImages,

    /// MIME type not accepted
    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),

    /// File larger than the upload limit
    #[error("image {name} is too large ({size_bytes} bytes)")]
    ImageTooLarge {
        /// File name
        name: String,

        /// File size in bytes
        size_bytes: u64,
    },

    /// The draft already holds the maximum number of tags
    #[error("a listing can have at most 10 tags")]
    TooManyTags,
}

/// Errors driving the wizard
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// The step's checks do not hold
    #[error("{0} step is incomplete")]
    StepIncomplete(ListingStep),

    /// There is no step after Review
    #[error("already at the last step")]
    LastStep,

    /// Submitting is only possible from the Review step
    #[error("listing can only be submitted from the review step")]
    NotAtReview,

    /// Terms have not been accepted
    #[error("terms and conditions have not been accepted")]
    TermsNotAccepted,

    /// A submission is in flight
    #[error("a submission is in progress")]
    Busy,

    /// No submission is in flight
    #[error("no submission is in progress")]
    NotSubmitting,
}

/// How buyers contact the seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// Microsoft Teams chat
    #[default]
    Teams,
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactMethod::Teams => f.write_str("Microsoft Teams"),
        }
    }
}

/// Wizard step, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListingStep {
    /// Title, description, category and condition
    BasicInfo,

    /// Photos
    Images,

    /// Price, exchange and location
    Pricing,

    /// Summary and terms
    Review,
}

impl ListingStep {
    /// Every step, in order.
    pub const ALL: [ListingStep; 4] = [
        ListingStep::BasicInfo,
        ListingStep::Images,
        ListingStep::Pricing,
        ListingStep::Review,
    ];

    /// One-based step number
    pub fn number(self) -> usize {
        match self {
            ListingStep::BasicInfo => 1,
            ListingStep::Images => 2,
            ListingStep::Pricing => 3,
            ListingStep::Review => 4,
        }
    }

    /// Step title
    pub fn label(self) -> &'static str {
        match self {
            ListingStep::BasicInfo => "Basic Info",
            ListingStep::Images => "Images",
            ListingStep::Pricing => "Pricing",
            ListingStep::Review => "Review",
        }
    }

    /// Following step
    pub fn next(self) -> Option<ListingStep> {
        match self {
            ListingStep::BasicInfo => Some(ListingStep::Images),
            ListingStep::Images => Some(ListingStep::Pricing),
            ListingStep::Pricing => Some(ListingStep::Review),
            ListingStep::Review => None,
        }
    }

    /// Preceding step
    pub fn previous(self) -> Option<ListingStep> {
        match self {
            ListingStep::BasicInfo => None,
            ListingStep::Images => Some(ListingStep::BasicInfo),
            ListingStep::Pricing => Some(ListingStep::Images),
            ListingStep::Review => Some(ListingStep::Pricing),
        }
    }
}

impl fmt::Display for ListingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Image as handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingImage {
    /// File name
    pub name: String,

    /// Preview URL
    pub preview_url: String,
}

/// Assembled listing, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Category
    pub category: Category,

    /// Condition
    pub condition: Condition,

    /// Asking price; `None` for exchange listings without a price
    pub price: Option<Money<'static, Currency>>,

    /// Pickup location
    pub location: String,

    /// Tags
    pub tags: Tags,

    /// Images in display order
    pub images: Vec<ListingImage>,

    /// What the seller wants in exchange
    pub exchange_for: Option<String>,

    /// Contact method
    pub contact_method: ContactMethod,
}

/// Listing being written by a seller.
#[derive(Debug)]
pub struct ListingDraft {
    title: String,
    description: String,
    category: Option<Category>,
    condition: Option<Condition>,
    price: String,
    location: String,
    tags: Tags,
    images: SlotMap<ImageKey, DraftImage>,
    image_order: Vec<ImageKey>,
    is_exchange: bool,
    exchange_for: String,
    contact_method: ContactMethod,
    previews: Arc<dyn PreviewRegistry>,
}

impl ListingDraft {
    /// Create an empty draft whose image previews live in `previews`.
    pub fn new(previews: Arc<dyn PreviewRegistry>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: None,
            condition: None,
            price: String::new(),
            location: String::new(),
            tags: Tags::new(),
            images: SlotMap::with_key(),
            image_order: Vec::new(),
            is_exchange: false,
            exchange_for: String::new(),
            contact_method: ContactMethod::default(),
            previews,
        }
    }

    /// Title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the title, keeping at most 100 characters.
    pub fn set_title(&mut self, title: &str) {
        self.title = truncate_chars(title, MAX_TITLE_LENGTH);
    }

    /// Description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the description, keeping at most 2000 characters.
    pub fn set_description(&mut self, description: &str) {
        self.description = truncate_chars(description, MAX_DESCRIPTION_LENGTH);
    }

    /// Category
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Set the category.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category;
    }

    /// Condition
    pub fn condition(&self) -> Option<Condition> {
        self.condition
    }

    /// Set the condition.
    pub fn set_condition(&mut self, condition: Option<Condition>) {
        self.condition = condition;
    }

    /// Price as typed
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Set the price text.
    pub fn set_price(&mut self, price: &str) {
        price.clone_into(&mut self.price);
    }

    /// Parsed price, if the text is a non-negative decimal that fits in minor units.
    pub fn price_amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.price.trim())
            .ok()
            .filter(|amount| !amount.is_sign_negative() && to_minor_units(*amount).is_some())
    }

    /// Location
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Set the pickup location.
    pub fn set_location(&mut self, location: &str) {
        location.clone_into(&mut self.location);
    }

    /// Tags
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Add a tag. Returns `Ok(false)` when the tag is empty or already present.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::TooManyTags`] when the draft already has ten tags.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool, DraftError> {
        if tag.trim().is_empty() || self.tags.contains(tag) {
            return Ok(false);
        }

        if self.tags.len() >= MAX_TAGS {
            return Err(DraftError::TooManyTags);
        }

        Ok(self.tags.add(tag))
    }

    /// Remove a tag.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Add an image and create its preview.
    ///
    /// # Errors
    ///
    /// Returns an error when the draft is full or the upload fails type or size checks.
    pub fn add_image(&mut self, upload: ImageUpload) -> Result<ImageKey, DraftError> {
        if self.image_count() >= MAX_IMAGES {
            return Err(DraftError::TooManyImages);
        }

        upload.validate()?;

        let preview = PreviewHandle::create(&self.previews, &upload);
        let key = self.images.insert(DraftImage::new(upload, preview));

        self.image_order.push(key);

        Ok(key)
    }

    /// Add images until the draft is full. Uploads that do not fit or fail checks are skipped.
    ///
    /// Returns the number of images added.
    pub fn add_images(&mut self, uploads: impl IntoIterator<Item = ImageUpload>) -> usize {
        uploads
            .into_iter()
            .filter_map(|upload| self.add_image(upload).ok())
            .count()
    }

    /// Remove an image, releasing its preview.
    pub fn remove_image(&mut self, key: ImageKey) -> bool {
        if self.images.remove(key).is_none() {
            return false;
        }

        self.image_order.retain(|existing| *existing != key);

        true
    }

    /// Number of images
    pub fn image_count(&self) -> usize {
        self.image_order.len()
    }

    /// Images in display order.
    pub fn images(&self) -> impl Iterator<Item = (ImageKey, &DraftImage)> {
        self.image_order
            .iter()
            .filter_map(|key| self.images.get(*key).map(|image| (*key, image)))
    }

    /// Whether the seller accepts an exchange.
    pub fn is_exchange(&self) -> bool {
        self.is_exchange
    }

    /// Toggle exchange.
    pub fn set_exchange(&mut self, is_exchange: bool) {
        self.is_exchange = is_exchange;
    }

    /// What the seller wants in exchange
    pub fn exchange_for(&self) -> &str {
        &self.exchange_for
    }

    /// Set the exchange wish.
    pub fn set_exchange_for(&mut self, exchange_for: &str) {
        exchange_for.clone_into(&mut self.exchange_for);
    }

    /// Contact method
    pub fn contact_method(&self) -> ContactMethod {
        self.contact_method
    }

    /// Check the Basic Info step.
    pub fn basic_info_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.category.is_some()
            && self.condition.is_some()
    }

    /// Check the Images step.
    pub fn images_complete(&self) -> bool {
        self.image_count() >= 1
    }

    /// Check the Pricing step.
    pub fn pricing_complete(&self) -> bool {
        !self.location.trim().is_empty() && (self.is_exchange || self.price_amount().is_some())
    }

    /// Check a single step.
    pub fn step_complete(&self, step: ListingStep) -> bool {
        match step {
            ListingStep::BasicInfo => self.basic_info_complete(),
            ListingStep::Images => self.images_complete(),
            ListingStep::Pricing => self.pricing_complete(),
            ListingStep::Review => true,
        }
    }

    /// First step whose checks do not hold.
    pub fn first_incomplete_step(&self) -> Option<ListingStep> {
        ListingStep::ALL
            .into_iter()
            .find(|step| !self.step_complete(*step))
    }

    /// Assemble the listing.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::StepIncomplete`] naming the first step whose checks fail.
    pub fn to_listing(&self) -> Result<Listing, WizardError> {
        if let Some(step) = self.first_incomplete_step() {
            return Err(WizardError::StepIncomplete(step));
        }

        let (Some(category), Some(condition)) = (self.category, self.condition) else {
            return Err(WizardError::StepIncomplete(ListingStep::BasicInfo));
        };

        let price = match self.price_amount().and_then(to_minor_units) {
            Some(minor_units) => Some(Money::from_minor(minor_units, AUD)),
            None if self.is_exchange => None,
            None => return Err(WizardError::StepIncomplete(ListingStep::Pricing)),
        };

        let exchange_for = (self.is_exchange && !self.exchange_for.trim().is_empty())
            .then(|| self.exchange_for.trim().to_string());

        Ok(Listing {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            condition,
            price,
            location: self.location.trim().to_string(),
            tags: self.tags.clone(),
            images: self
                .images()
                .map(|(_, image)| ListingImage {
                    name: image.upload().name.clone(),
                    preview_url: image.preview_url().to_string(),
                })
                .collect(),
            exchange_for,
            contact_method: self.contact_method,
        })
    }

    /// Empty every field, releasing all previews.
    pub fn clear(&mut self) {
        let previews = Arc::clone(&self.previews);

        *self = Self::new(previews);
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Submission progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// Waiting on the submission collaborator
    Submitting,

    /// Last submission succeeded
    Submitted,

    /// Last submission failed; the draft is kept for correction
    Failed(String),
}

/// What the wizard is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    /// Editing a step
    Editing(ListingStep),

    /// Submission in flight
    Submitting,

    /// Listing published
    Submitted,

    /// Submission failed with a reason
    SubmitError(String),
}

/// Four-step listing wizard.
#[derive(Debug)]
pub struct ListingWizard {
    draft: ListingDraft,
    step: ListingStep,
    terms_accepted: bool,
    status: SubmitStatus,
}

impl ListingWizard {
    /// Create a wizard on the first step with an empty draft.
    pub fn new(previews: Arc<dyn PreviewRegistry>) -> Self {
        Self {
            draft: ListingDraft::new(previews),
            step: ListingStep::BasicInfo,
            terms_accepted: false,
            status: SubmitStatus::Idle,
        }
    }

    /// Current step
    pub fn step(&self) -> ListingStep {
        self.step
    }

    /// Submission progress
    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Current phase
    pub fn phase(&self) -> WizardPhase {
        match &self.status {
            SubmitStatus::Idle => WizardPhase::Editing(self.step),
            SubmitStatus::Submitting => WizardPhase::Submitting,
            SubmitStatus::Submitted => WizardPhase::Submitted,
            SubmitStatus::Failed(reason) => WizardPhase::SubmitError(reason.clone()),
        }
    }

    /// Draft being edited
    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Mutable access to the draft. Leaves a finished or failed submission behind.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Busy`] while a submission is in flight.
    pub fn draft_mut(&mut self) -> Result<&mut ListingDraft, WizardError> {
        self.resume_editing()?;

        Ok(&mut self.draft)
    }

    /// Whether the terms have been accepted
    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Accept or withdraw the terms.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Busy`] while a submission is in flight.
    pub fn accept_terms(&mut self, accepted: bool) -> Result<(), WizardError> {
        self.resume_editing()?;
        self.terms_accepted = accepted;

        Ok(())
    }

    /// Whether the Next button is enabled
    pub fn can_advance(&self) -> bool {
        self.status != SubmitStatus::Submitting
            && self.step.next().is_some()
            && self.draft.step_complete(self.step)
    }

    /// Whether the Submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.status != SubmitStatus::Submitting
            && self.step == ListingStep::Review
            && self.terms_accepted
            && self.draft.first_incomplete_step().is_none()
    }

    /// Move to the next step.
    ///
    /// # Errors
    ///
    /// Returns an error if the current step is incomplete, there is no next step, or a
    /// submission is in flight.
    pub fn next(&mut self) -> Result<ListingStep, WizardError> {
        self.resume_editing()?;

        if !self.draft.step_complete(self.step) {
            return Err(WizardError::StepIncomplete(self.step));
        }

        let next = self.step.next().ok_or(WizardError::LastStep)?;
        self.step = next;

        Ok(next)
    }

    /// Move back one step without checking the step being left.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Busy`] while a submission is in flight.
    pub fn previous(&mut self) -> Result<ListingStep, WizardError> {
        self.resume_editing()?;

        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }

        Ok(self.step)
    }

    /// Start submitting: checks every gate and the terms, then hands back the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if a submission is already in flight, the wizard is not on the Review
    /// step, the terms are not accepted or a step is incomplete.
    pub fn begin_submit(&mut self) -> Result<Listing, WizardError> {
        self.ensure_idle()?;

        if self.step != ListingStep::Review {
            return Err(WizardError::NotAtReview);
        }

        if !self.terms_accepted {
            return Err(WizardError::TermsNotAccepted);
        }

        let listing = self.draft.to_listing()?;
        self.status = SubmitStatus::Submitting;

        Ok(listing)
    }

    /// Record a successful submission and start over with an empty draft.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NotSubmitting`] if no submission is in flight.
    pub fn complete_submit(&mut self) -> Result<(), WizardError> {
        self.ensure_submitting()?;

        self.draft.clear();
        self.step = ListingStep::BasicInfo;
        self.terms_accepted = false;
        self.status = SubmitStatus::Submitted;

        Ok(())
    }

    /// Record a failed submission. The draft stays on the Review step for correction.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NotSubmitting`] if no submission is in flight.
    pub fn fail_submit(&mut self, reason: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_submitting()?;
        self.status = SubmitStatus::Failed(reason.into());

        Ok(())
    }

    /// Abandon an in-flight submission and return to Review.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NotSubmitting`] if no submission is in flight.
    pub fn cancel_submit(&mut self) -> Result<(), WizardError> {
        self.ensure_submitting()?;
        self.status = SubmitStatus::Idle;

        Ok(())
    }

    /// Start over with an empty draft.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Busy`] while a submission is in flight.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.ensure_idle()?;

        self.draft.clear();
        self.step = ListingStep::BasicInfo;
        self.terms_accepted = false;
        self.status = SubmitStatus::Idle;

        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.status == SubmitStatus::Submitting {
            return Err(WizardError::Busy);
        }

        Ok(())
    }

    fn resume_editing(&mut self) -> Result<(), WizardError> {
        self.ensure_idle()?;

        if matches!(self.status, SubmitStatus::Submitted | SubmitStatus::Failed(_)) {
            self.status = SubmitStatus::Idle;
        }

        Ok(())
    }

    fn ensure_submitting(&self) -> Result<(), WizardError> {
        if self.status != SubmitStatus::Submitting {
            return Err(WizardError::NotSubmitting);
        }

        Ok(())
    }
}
