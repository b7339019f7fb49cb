//! Identity service: email login and credential issuing

use std::sync::Arc;

use crate::{
    config::{AuthConfig, DisplayNamePolicy},
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{User, UserClaims},
    },
    repository::UsersStore,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UsersStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Resolve (or create) the user for `email` and issue a bearer token.
    ///
    /// New users get the `user` role and a name taken from `display_name`,
    /// falling back to the local part of the email.
    pub async fn login(&self, email: Option<&str>, display_name: Option<&str>) -> AppResult<(String, User)> {
        // Lookup is an exact match on the address as sent
        let email = email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Email required".to_string()))?;
        let display_name = display_name.map(str::trim).filter(|n| !n.is_empty());

        let mut user = match self.users.get_by_email(email).await? {
            Some(user) => user,
            None => {
                let name = display_name.unwrap_or_else(|| local_part(email));
                let user = self.users.insert_or_get(name, email, Role::User).await?;
                tracing::info!(user_id = user.id, email = %user.email, "Created user on first login");
                user
            }
        };

        if self.config.display_name_policy == DisplayNamePolicy::PreferSupplied {
            if let Some(name) = display_name {
                user.name = name.to_string();
            }
        }

        let claims = UserClaims::new(&user, user.name.clone(), self.config.jwt_expiration_hours);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, user))
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
