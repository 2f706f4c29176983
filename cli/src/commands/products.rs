//! Product commands

use anyhow::Result;
use clap::{Args, Subcommand};
use crud_core::{FormError, ProductForm, Products};
use uuid::Uuid;

use super::Context;
use crate::output::View;

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List all products
    List,

    /// Show one product
    Show {
        /// Product ID
        id: Uuid,
    },

    /// Add a product
    Add(ProductFields),

    /// Edit a product; omitted fields keep their current values
    Edit {
        /// Product ID
        id: Uuid,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Form fields as typed on the command line. Validation happens in the form.
#[derive(Args, Debug, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Comma-separated tags, e.g. "audio, wireless"
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub in_stock: Option<bool>,
}

impl ProductFields {
    pub fn apply(self, form: &mut ProductForm) -> Result<(), FormError> {
        if let Some(name) = self.name {
            form.edit("name", |d| d.name = name)?;
        }
        if let Some(description) = self.description {
            form.edit("description", |d| d.description = description)?;
        }
        if let Some(price) = self.price {
            form.edit("price", |d| d.price = price)?;
        }
        if let Some(category) = self.category {
            form.edit("category", |d| d.category = category)?;
        }
        if let Some(tags) = self.tags {
            form.edit("tags", |d| d.tags = tags)?;
        }
        if let Some(in_stock) = self.in_stock {
            form.edit("in_stock", |d| d.in_stock = in_stock)?;
        }
        Ok(())
    }
}

pub fn execute(cmd: ProductCommands, ctx: &mut Context) -> Result<()> {
    match cmd {
        ProductCommands::List => super::list::<Products>(ctx, View::Products),
        ProductCommands::Show { id } => super::show::<Products>(ctx, id),
        ProductCommands::Add(fields) => super::add::<Products>(ctx, |form| fields.apply(form)),
        ProductCommands::Edit { id, fields } => {
            super::edit::<Products>(ctx, id, |form| fields.apply(form))
        }
        ProductCommands::Delete { id, yes } => {
            ctx.assume_yes |= yes;
            super::delete::<Products>(ctx, id)
        }
    }
}
