//! Form controller: draft state and the submit lifecycle.
//!
//! ```text
//! Closed --open_create--> Open(Create)
//! Closed --open_edit----> Open(Edit(id))
//! Open   --begin_submit-> Submitting      (only when validation passes)
//! Submitting --finish Ok--> Closed
//! Submitting --finish Err-> Open          (draft kept for correction)
//! any    --close--------> Closed
//! ```
//!
//! While submitting, `begin_submit`, `edit` and `cancel` are refused, so a
//! form never has two requests in flight.

use log::debug;
use thiserror::Error;
use uuid::Uuid;

use crate::collection::{CollectionController, CollectionError};
use crate::draft::FormResource;
use crate::resource::{Products, Users};
use crate::service::Transport;
use crate::validate::FieldErrors;

pub type ProductForm = FormController<Products>;
pub type UserForm = FormController<Users>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("form is not open")]
    NotOpen,
    #[error("form is already open")]
    AlreadyOpen,
    #[error("form is submitting")]
    Submitting,
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Rejected(#[from] CollectionError),
}

/// A validated, normalised payload ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<C, U> {
    Create(C),
    Update(Uuid, U),
}

pub type SubmissionFor<R> =
    Submission<<R as crate::resource::Resource>::Create, <R as crate::resource::Resource>::Update>;

#[derive(Debug)]
pub struct FormController<R: FormResource> {
    state: FormState,
    draft: Option<R::Draft>,
    errors: FieldErrors,
}

impl<R: FormResource> Default for FormController<R> {
    fn default() -> Self {
        Self {
            state: FormState::Closed,
            draft: None,
            errors: FieldErrors::new(),
        }
    }
}

impl<R: FormResource> FormController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self.state {
            FormState::Closed => None,
            FormState::Open(mode) | FormState::Submitting(mode) => Some(mode),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state != FormState::Closed
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting(_))
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        self.draft.as_ref()
    }

    /// Field errors from the last rejected submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn open(&mut self, mode: FormMode, draft: R::Draft) -> Result<(), FormError> {
        if self.state != FormState::Closed {
            return Err(FormError::AlreadyOpen);
        }
        self.state = FormState::Open(mode);
        self.draft = Some(draft);
        self.errors = FieldErrors::new();
        Ok(())
    }

    pub fn open_create(&mut self) -> Result<(), FormError> {
        self.open(FormMode::Create, R::Draft::default())
    }

    pub fn open_edit(&mut self, record: &R::Record) -> Result<(), FormError> {
        self.open(FormMode::Edit(R::id(record)), R::seed(record))
    }

    /// Apply a change to the draft and clear the error shown for `field`.
    pub fn edit(&mut self, field: &str, apply: impl FnOnce(&mut R::Draft)) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Submitting);
        }
        let draft = self.draft.as_mut().ok_or(FormError::NotOpen)?;
        apply(draft);
        self.errors.remove(field);
        Ok(())
    }

    /// Validate the current draft without changing any state.
    pub fn validate(&self) -> Result<FieldErrors, FormError> {
        match (self.mode(), self.draft.as_ref()) {
            (Some(mode), Some(draft)) => Ok(R::validate(draft, &mode)),
            _ => Err(FormError::NotOpen),
        }
    }

    /// Validate and normalise the draft, moving to `Submitting`.
    pub fn begin_submit(&mut self) -> Result<SubmissionFor<R>, FormError> {
        let mode = match self.state {
            FormState::Closed => return Err(FormError::NotOpen),
            FormState::Submitting(_) => return Err(FormError::Submitting),
            FormState::Open(mode) => mode,
        };
        let draft = self.draft.as_ref().ok_or(FormError::NotOpen)?;
        let submission = match mode {
            FormMode::Create => R::to_create(draft).map(Submission::Create),
            FormMode::Edit(id) => R::to_update(draft).map(|payload| Submission::Update(id, payload)),
        };
        match submission {
            Ok(submission) => {
                self.errors = FieldErrors::new();
                self.state = FormState::Submitting(mode);
                Ok(submission)
            }
            Err(errors) => {
                debug!("{} form rejected: {errors}", R::SINGULAR);
                self.errors = errors.clone();
                Err(FormError::Invalid(errors))
            }
        }
    }

    /// Settle a submission started with [`begin_submit`](Self::begin_submit).
    ///
    /// Success closes the form; failure reopens it with the draft intact.
    /// Server failures never populate field errors.
    pub fn finish_submit(
        &mut self,
        outcome: Result<R::Record, CollectionError>,
    ) -> Result<R::Record, FormError> {
        let mode = match self.state {
            FormState::Submitting(mode) => mode,
            _ => return Err(FormError::NotOpen),
        };
        match outcome {
            Ok(record) => {
                self.close();
                Ok(record)
            }
            Err(err) => {
                self.state = FormState::Open(mode);
                Err(FormError::Rejected(err))
            }
        }
    }

    /// Submit the draft through `collection` and settle the result.
    pub fn submit<T: Transport>(
        &mut self,
        collection: &mut CollectionController<R, T>,
    ) -> Result<R::Record, FormError> {
        let outcome = match self.begin_submit()? {
            Submission::Create(payload) => collection.create(&payload),
            Submission::Update(id, payload) => collection.update(id, &payload),
        };
        self.finish_submit(outcome)
    }

    /// User-initiated cancel. Refused while a request is in flight.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Submitting);
        }
        self.close();
        Ok(())
    }

    /// Close unconditionally, discarding the draft.
    pub fn close(&mut self) {
        self.state = FormState::Closed;
        self.draft = None;
        self.errors = FieldErrors::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ResourceClient;
    use crate::collection::{ProductCollection, UserCollection};
    use crate::draft::ProductDraft;
    use crate::testing::ScriptedTransport;
    use crate::types::{Product, User};
    use chrono::{TimeZone, Utc};

    fn products(transport: &ScriptedTransport) -> ProductCollection<&ScriptedTransport> {
        CollectionController::with_transport(ResourceClient::new("http://api.test"), transport)
    }

    fn users(transport: &ScriptedTransport) -> UserCollection<&ScriptedTransport> {
        CollectionController::with_transport(ResourceClient::new("http://api.test"), transport)
    }

    fn tagged_product() -> Product {
        Product {
            id: Uuid::from_u128(5),
            name: "Laptop Stand".to_string(),
            description: "Adjustable aluminum stand".to_string(),
            price: 45.99,
            category: "Accessories".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
            in_stock: true,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    fn fill(form: &mut ProductForm) {
        form.edit("name", |d| d.name = "Mug".to_string()).unwrap();
        form.edit("description", |d| d.description = "Ceramic".to_string()).unwrap();
        form.edit("price", |d| d.price = "12.50".to_string()).unwrap();
        form.edit("category", |d| d.category = "Kitchen".to_string()).unwrap();
        form.edit("tags", |d| d.tags = " tea, ,coffee ".to_string()).unwrap();
    }

    const MUG: &str = r#"{"id":"00000000-0000-0000-0000-000000000009","name":"Mug","description":"Ceramic","price":12.5,"category":"Kitchen","tags":["tea","coffee"],"in_stock":true,"created_at":"2024-01-01T00:00:00Z"}"#;

    #[test]
    fn open_create_starts_with_default_draft() {
        let mut form = ProductForm::new();
        form.open_create().unwrap();
        assert_eq!(form.state(), FormState::Open(FormMode::Create));
        assert_eq!(form.draft(), Some(&ProductDraft::default()));
        assert_eq!(form.open_create(), Err(FormError::AlreadyOpen));
    }

    #[test]
    fn missing_name_never_reaches_the_server() {
        let transport = ScriptedTransport::new();
        let mut collection = products(&transport);
        let mut form = ProductForm::new();
        form.open_create().unwrap();
        form.edit("price", |d| d.price = "10".to_string()).unwrap();

        let errors = match form.submit(&mut collection) {
            Err(FormError::Invalid(errors)) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert!(!errors.contains("price"));
        assert!(transport.requests().is_empty());
        assert_eq!(form.state(), FormState::Open(FormMode::Create));
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = ProductForm::new();
        form.open_create().unwrap();
        assert!(form.begin_submit().is_err());
        assert!(form.errors().contains("name"));
        form.edit("name", |d| d.name = "Mug".to_string()).unwrap();
        assert!(!form.errors().contains("name"));
        assert!(form.errors().contains("price"));
    }

    #[test]
    fn validate_previews_without_touching_state() {
        let mut form = UserForm::new();
        assert_eq!(form.validate(), Err(FormError::NotOpen));

        form.open_create().unwrap();
        form.edit("email", |d| d.email = "not-an-email".to_string()).unwrap();
        let preview = form.validate().unwrap();
        assert_eq!(preview.get("email"), Some("Email is invalid"));
        assert!(preview.contains("name"));
        assert!(preview.contains("password"));
        assert_eq!(form.state(), FormState::Open(FormMode::Create));
        assert!(form.errors().is_empty());

        // edit mode lets a blank password through
        let user = User {
            id: Uuid::from_u128(3),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        form.close();
        form.open_edit(&user).unwrap();
        assert!(form.validate().unwrap().is_empty());
        assert_eq!(form.state(), FormState::Open(FormMode::Edit(user.id)));
    }

    #[test]
    fn successful_create_normalizes_and_closes() {
        let transport = ScriptedTransport::new();
        transport.respond(200, MUG);
        let mut collection = products(&transport);
        let mut form = ProductForm::new();
        form.open_create().unwrap();
        fill(&mut form);

        let created = form.submit(&mut collection).unwrap();
        assert_eq!(created.tags, ["tea", "coffee"]);
        assert_eq!(form.state(), FormState::Closed);
        assert!(form.draft().is_none());
        assert_eq!(collection.records(), [created]);

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["price"], 12.5);
        assert_eq!(body["tags"], serde_json::json!(["tea", "coffee"]));
    }

    #[test]
    fn failed_create_keeps_form_open_for_retry() {
        let transport = ScriptedTransport::new();
        transport.respond(500, "oops");
        transport.respond(200, MUG);
        let mut collection = products(&transport);
        let mut form = ProductForm::new();
        form.open_create().unwrap();
        fill(&mut form);

        let err = form.submit(&mut collection).unwrap_err();
        assert_eq!(err.to_string(), "Failed to create product");
        assert_eq!(form.state(), FormState::Open(FormMode::Create));
        assert!(form.errors().is_empty());
        assert_eq!(form.draft().map(|d| d.name.as_str()), Some("Mug"));
        assert!(collection.records().is_empty());

        form.submit(&mut collection).unwrap();
        assert_eq!(collection.records().len(), 1);
    }

    #[test]
    fn submitting_blocks_resubmit_and_cancel() {
        let mut form = ProductForm::new();
        form.open_create().unwrap();
        fill(&mut form);
        let submission = form.begin_submit().unwrap();
        assert!(matches!(submission, Submission::Create(_)));
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(FormError::Submitting));
        assert_eq!(form.cancel(), Err(FormError::Submitting));
        assert_eq!(form.edit("name", |_| {}), Err(FormError::Submitting));

        form.close();
        assert_eq!(form.state(), FormState::Closed);
    }

    #[test]
    fn edit_round_trips_tags() {
        let record = tagged_product();
        let mut form = ProductForm::new();
        form.open_edit(&record).unwrap();
        assert_eq!(form.draft().map(|d| d.tags.as_str()), Some("a, b"));

        match form.begin_submit().unwrap() {
            Submission::Update(id, update) => {
                assert_eq!(id, record.id);
                assert_eq!(update.tags, Some(record.tags.clone()));
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn user_edit_with_blank_password_keeps_current() {
        let user = User {
            id: Uuid::from_u128(3),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        };
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            &format!(
                r#"[{{"id":"{}","name":"Grace","email":"grace@example.com","created_at":"2024-06-01T00:00:00Z"}}]"#,
                user.id
            ),
        );
        transport.respond(
            200,
            &format!(
                r#"{{"id":"{}","name":"Grace Hopper","email":"grace@example.com","created_at":"2024-06-01T00:00:00Z"}}"#,
                user.id
            ),
        );
        let mut collection = users(&transport);
        collection.load().unwrap();

        let mut form = UserForm::new();
        form.open_edit(&user).unwrap();
        form.edit("name", |d| d.name = "Grace Hopper".to_string()).unwrap();
        let updated = form.submit(&mut collection).unwrap();
        assert_eq!(updated.name, "Grace Hopper");
        assert_eq!(collection.records()[0].name, "Grace Hopper");

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[1].body.as_deref().unwrap()).unwrap();
        assert!(body.get("password").is_none());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut form = UserForm::new();
        form.open_create().unwrap();
        form.edit("email", |d| d.email = "x@y.z".to_string()).unwrap();
        form.cancel().unwrap();
        assert!(form.draft().is_none());
        assert_eq!(form.edit("email", |_| {}), Err(FormError::NotOpen));
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut form = UserForm::new();
        let err = form
            .finish_submit(Ok(User {
                id: Uuid::nil(),
                name: String::new(),
                email: String::new(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            }))
            .unwrap_err();
        assert_eq!(err, FormError::NotOpen);
    }
}
