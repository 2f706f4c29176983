//! User commands

use anyhow::Result;
use clap::{Args, Subcommand};
use crud_core::{FormError, UserForm, Users};
use uuid::Uuid;

use super::Context;
use crate::output::View;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List,

    /// Show one user
    Show {
        /// User ID
        id: Uuid,
    },

    /// Add a user
    Add(UserFields),

    /// Edit a user; leave --password out to keep the current password
    Edit {
        /// User ID
        id: Uuid,

        #[command(flatten)]
        fields: UserFields,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct UserFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, env = "CRUD_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl UserFields {
    pub fn apply(self, form: &mut UserForm) -> Result<(), FormError> {
        if let Some(name) = self.name {
            form.edit("name", |d| d.name = name)?;
        }
        if let Some(email) = self.email {
            form.edit("email", |d| d.email = email)?;
        }
        if let Some(password) = self.password {
            form.edit("password", |d| d.password = password)?;
        }
        Ok(())
    }
}

pub fn execute(cmd: UserCommands, ctx: &mut Context) -> Result<()> {
    match cmd {
        UserCommands::List => super::list::<Users>(ctx, View::Users),
        UserCommands::Show { id } => super::show::<Users>(ctx, id),
        UserCommands::Add(fields) => super::add::<Users>(ctx, |form| fields.apply(form)),
        UserCommands::Edit { id, fields } => super::edit::<Users>(ctx, id, |form| fields.apply(form)),
        UserCommands::Delete { id, yes } => {
            ctx.assume_yes |= yes;
            super::delete::<Users>(ctx, id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crud_core::{Submission, User};

    #[test]
    fn edit_without_password_keeps_current() {
        let user = User {
            id: Uuid::from_u128(4),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let mut form = UserForm::new();
        form.open_edit(&user).unwrap();
        UserFields {
            email: Some("grace@navy.mil".to_string()),
            ..Default::default()
        }
        .apply(&mut form)
        .unwrap();

        match form.begin_submit().unwrap() {
            Submission::Update(id, update) => {
                assert_eq!(id, user.id);
                assert_eq!(update.email.as_deref(), Some("grace@navy.mil"));
                assert_eq!(update.password, None);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }
}
