//! Drafts: client-only working copies of records while a form is open.
//!
//! Drafts keep every field as the user typed it (price and tags are text).
//! Normalisation into API payloads happens only after validation passes.

use crate::form::FormMode;
use crate::resource::{Products, Resource, Users};
use crate::types::{NewProduct, NewUser, Product, ProductUpdate, User, UserUpdate};
use crate::validate::{self, FieldErrors};

/// A resource that can be edited through a form.
pub trait FormResource: Resource {
    type Draft: Default + Clone + std::fmt::Debug;

    /// Seed a draft from a persisted record for editing.
    fn seed(record: &Self::Record) -> Self::Draft;

    fn validate(draft: &Self::Draft, mode: &FormMode) -> FieldErrors;

    /// Validate and normalise a draft into a create payload.
    fn to_create(draft: &Self::Draft) -> Result<Self::Create, FieldErrors>;

    /// Validate and normalise a draft into an update payload.
    fn to_update(draft: &Self::Draft) -> Result<Self::Update, FieldErrors>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub tags: String,
    pub in_stock: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            tags: String::new(),
            in_stock: true,
        }
    }
}

impl ProductDraft {
    pub fn from_record(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            tags: validate::join_tags(&product.tags),
            in_stock: product.in_stock,
        }
    }

    fn normalize(&self) -> Result<NewProduct, FieldErrors> {
        let errors = validate::validate_product(self);
        match validate::parse_price(&self.price) {
            Some(price) if errors.is_empty() => Ok(NewProduct {
                name: self.name.clone(),
                description: self.description.clone(),
                price,
                category: self.category.clone(),
                tags: validate::split_tags(&self.tags),
                in_stock: self.in_stock,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserDraft {
    /// The password is never known to the client, so it starts blank.
    pub fn from_record(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
        }
    }
}

impl FormResource for Products {
    type Draft = ProductDraft;

    fn seed(record: &Product) -> ProductDraft {
        ProductDraft::from_record(record)
    }

    fn validate(draft: &ProductDraft, _mode: &FormMode) -> FieldErrors {
        validate::validate_product(draft)
    }

    fn to_create(draft: &ProductDraft) -> Result<NewProduct, FieldErrors> {
        draft.normalize()
    }

    fn to_update(draft: &ProductDraft) -> Result<ProductUpdate, FieldErrors> {
        let product = draft.normalize()?;
        Ok(ProductUpdate {
            name: Some(product.name),
            description: Some(product.description),
            price: Some(product.price),
            category: Some(product.category),
            tags: Some(product.tags),
            in_stock: Some(product.in_stock),
        })
    }
}

impl FormResource for Users {
    type Draft = UserDraft;

    fn seed(record: &User) -> UserDraft {
        UserDraft::from_record(record)
    }

    fn validate(draft: &UserDraft, mode: &FormMode) -> FieldErrors {
        validate::validate_user(draft, mode)
    }

    fn to_create(draft: &UserDraft) -> Result<NewUser, FieldErrors> {
        let errors = validate::user_errors(draft, false);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewUser {
            name: draft.name.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
        })
    }

    fn to_update(draft: &UserDraft) -> Result<UserUpdate, FieldErrors> {
        let errors = validate::user_errors(draft, true);
        if !errors.is_empty() {
            return Err(errors);
        }
        let password = if draft.password.trim().is_empty() {
            None
        } else {
            Some(draft.password.clone())
        };
        Ok(UserUpdate {
            name: Some(draft.name.clone()),
            email: Some(draft.email.clone()),
            password,
        })
    }
}
