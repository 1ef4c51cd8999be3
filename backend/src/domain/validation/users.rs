use std::sync::Arc;

use anyhow::Result;
use shared::FieldError;

use crate::domain::commands::users::{
    ChangePasswordCommand, CreateUserCommand, UpdateUserCommand,
};
use crate::domain::validation::{check_id_param, is_alphanumeric, is_valid_email, Violations};
use crate::storage::traits::UserStore;

const MIN_PASSWORD_LEN: usize = 8;

/// Field rule sets for user requests.
#[derive(Clone)]
pub struct UserValidator {
    users: Arc<dyn UserStore>,
}

impl UserValidator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Rules for `POST /api/v1/user`.
    pub async fn validate_create(&self, cmd: &CreateUserCommand) -> Result<Vec<FieldError>> {
        let mut v = Violations::new();

        self.check_name(&mut v, cmd.name.as_deref());
        self.check_username(&mut v, cmd.username.as_deref(), None).await?;
        self.check_email(&mut v, cmd.email.as_deref(), None).await?;
        self.check_password(&mut v, cmd.password.as_deref());
        self.check_confirm_password(&mut v, cmd.password.as_deref(), cmd.confirm_password.as_deref());

        Ok(v.into_vec())
    }

    /// Rules for `PATCH /api/v1/user/:id`. Uniqueness excludes the
    /// edited record so a user can keep their own username and email.
    pub async fn validate_update(&self, cmd: &UpdateUserCommand) -> Result<Vec<FieldError>> {
        let mut v = Violations::new();

        check_id_param(&mut v, &cmd.user_id);
        self.check_name(&mut v, cmd.name.as_deref());
        self.check_username(&mut v, cmd.username.as_deref(), Some(cmd.user_id.as_str()))
            .await?;
        self.check_email(&mut v, cmd.email.as_deref(), Some(cmd.user_id.as_str()))
            .await?;

        Ok(v.into_vec())
    }

    /// Rules for `PATCH /api/v1/user/:id/password`. Whether the old
    /// password actually matches is the service's call; here it only
    /// has to be present.
    pub fn validate_change_password(&self, cmd: &ChangePasswordCommand) -> Vec<FieldError> {
        let mut v = Violations::new();

        check_id_param(&mut v, &cmd.user_id);
        if cmd.old_password.as_deref().unwrap_or_default().is_empty() {
            v.body("oldPassword", "old password is required");
        }
        self.check_password(&mut v, cmd.password.as_deref());
        self.check_confirm_password(&mut v, cmd.password.as_deref(), cmd.confirm_password.as_deref());

        v.into_vec()
    }

    fn check_name(&self, v: &mut Violations, name: Option<&str>) {
        if name.unwrap_or_default().trim().is_empty() {
            v.body("name", "name is required");
        }
    }

    async fn check_username(
        &self,
        v: &mut Violations,
        username: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let username = username.unwrap_or_default();
        if username.is_empty() {
            v.body("username", "username is required");
        } else if !is_alphanumeric(username) {
            v.body("username", "username is only letters and numbers");
        } else if self
            .users
            .find_user_by_username(username, exclude_id)
            .await?
            .is_some()
        {
            v.body("username", "username already used");
        }
        Ok(())
    }

    async fn check_email(
        &self,
        v: &mut Violations,
        email: Option<&str>,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        let email = email.unwrap_or_default();
        if email.is_empty() {
            v.body("email", "email is required");
        } else if !is_valid_email(email) {
            v.body("email", "email not valid");
        } else if self
            .users
            .find_user_by_email(email, exclude_id)
            .await?
            .is_some()
        {
            v.body("email", "email already used");
        }
        Ok(())
    }

    fn check_password(&self, v: &mut Violations, password: Option<&str>) {
        let password = password.unwrap_or_default();
        if password.is_empty() {
            v.body("password", "password is required");
        } else if password.len() < MIN_PASSWORD_LEN {
            v.body("password", "password must be at least 8 characters");
        } else if !password.chars().any(|c| c.is_ascii_lowercase())
            || !password.chars().any(|c| c.is_ascii_uppercase())
            || !password.chars().any(|c| c.is_ascii_digit())
        {
            v.body(
                "password",
                "password must contain lowercase, uppercase, and number",
            );
        }
    }

    fn check_confirm_password(
        &self,
        v: &mut Violations,
        password: Option<&str>,
        confirm: Option<&str>,
    ) {
        if confirm.unwrap_or_default() != password.unwrap_or_default() {
            v.body("confirmPassword", "confirm password doesn't match");
        }
    }
}
