//! Command handlers shared by the products and users subcommands.

pub mod products;
pub mod users;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use crud_core::{
    CollectionController, Confirm, DeleteOutcome, FormController, FormError, FormResource,
    Resource, ResourceClient, Transport,
};
use serde::Serialize;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::output::{self, Card, OutputFormat, View};
use crate::transport::UreqTransport;

/// Everything a command needs to talk to the API and print results.
pub struct Context {
    base_url: String,
    headers: Vec<(String, String)>,
    transport: UreqTransport,
    pub format: OutputFormat,
    pub assume_yes: bool,
}

impl Context {
    pub fn new(api: &ApiConfig, format: OutputFormat) -> Self {
        Self {
            base_url: api.base_url.clone(),
            headers: api.header_list(),
            transport: UreqTransport::new(Duration::from_secs(api.timeout_secs)),
            format,
            assume_yes: false,
        }
    }

    pub fn collection<R: Resource>(&self) -> CollectionController<R, &UreqTransport> {
        let client = ResourceClient::new(&self.base_url).with_headers(self.headers.clone());
        CollectionController::with_transport(client, &self.transport)
    }
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub fn ask(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn confirm_with(assume_yes: bool) -> impl FnMut(&str) -> bool {
    move |prompt: &str| {
        assume_yes
            || ask(prompt).unwrap_or_else(|err| {
                log::warn!("could not read confirmation: {err}");
                false
            })
    }
}

/// Load the collection, offering a retry while loading fails.
fn load_with_retry<R: Resource, T: Transport>(
    collection: &mut CollectionController<R, T>,
    mut retry: impl Confirm,
) -> Result<()> {
    loop {
        let err = match collection.load() {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };
        eprintln!("{}", output::error_banner(err.message()));
        if !err.is_retryable() || !retry.confirm("Try again?") {
            bail!(err);
        }
    }
}

pub fn list<R>(ctx: &Context, view: View) -> Result<()>
where
    R: Resource,
    R::Record: Card,
{
    let mut collection = ctx.collection::<R>();
    load_with_retry(&mut collection, confirm_with(false))?;
    if ctx.format == OutputFormat::Card {
        println!("{}\n", output::header(view));
    }
    println!("{}", output::render_list::<R>(collection.view(), ctx.format));
    Ok(())
}

pub fn show<R>(ctx: &Context, id: Uuid) -> Result<()>
where
    R: Resource,
    R::Record: Card + Serialize,
{
    let record = ctx.collection::<R>().fetch(id)?;
    println!("{}", output::render_record(&record, ctx.format));
    Ok(())
}

/// Submit an open form and print the saved record or the reasons it was not
/// saved.
pub fn save<R>(
    ctx: &Context,
    form: &mut FormController<R>,
    collection: &mut CollectionController<R, &UreqTransport>,
) -> Result<()>
where
    R: FormResource,
    R::Record: Card,
{
    match form.submit(collection) {
        Ok(record) => {
            println!("{}", output::render_record(&record, ctx.format));
            Ok(())
        }
        Err(FormError::Invalid(errors)) => {
            eprintln!("{}", output::error_banner(&format!("{} not saved", R::SINGULAR)));
            eprintln!("{}", output::field_errors(&errors));
            bail!("invalid {}", R::SINGULAR)
        }
        Err(FormError::Rejected(err)) => {
            eprintln!("{}", output::error_banner(err.message()));
            bail!(err)
        }
        Err(other) => Err(other.into()),
    }
}

pub fn edit<R>(
    ctx: &Context,
    id: Uuid,
    apply: impl FnOnce(&mut FormController<R>) -> Result<(), FormError>,
) -> Result<()>
where
    R: FormResource,
    R::Record: Card,
{
    let mut collection = ctx.collection::<R>();
    load_with_retry(&mut collection, confirm_with(false))?;
    let Some(record) = collection.find(id).cloned() else {
        bail!("no {} with id {id}", R::SINGULAR);
    };
    let mut form = FormController::<R>::new();
    form.open_edit(&record)?;
    apply(&mut form)?;
    save(ctx, &mut form, &mut collection)
}

pub fn add<R>(
    ctx: &Context,
    apply: impl FnOnce(&mut FormController<R>) -> Result<(), FormError>,
) -> Result<()>
where
    R: FormResource,
    R::Record: Card,
{
    let mut collection = ctx.collection::<R>();
    let mut form = FormController::<R>::new();
    form.open_create()?;
    apply(&mut form)?;
    save(ctx, &mut form, &mut collection)
}

pub fn delete<R>(ctx: &Context, id: Uuid) -> Result<()>
where
    R: Resource,
    R::Record: Card,
{
    let mut collection = ctx.collection::<R>();
    load_with_retry(&mut collection, confirm_with(false))?;
    if let Some(record) = collection.find(id) {
        println!("{}\n", record.card());
    }
    match collection.delete(id, confirm_with(ctx.assume_yes)) {
        Ok(DeleteOutcome::Deleted) => {
            println!("Deleted {} {id}", R::SINGULAR);
            Ok(())
        }
        Ok(DeleteOutcome::Declined) => {
            println!("Cancelled");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", output::error_banner(err.message()));
            bail!(err)
        }
    }
}
