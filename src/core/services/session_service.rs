//! User registration and token-based session handling.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::User;
use crate::errors::FinanceError;
use crate::ledger::Ledger;

use super::ServiceResult;

pub struct SessionService;

impl SessionService {
    pub fn register(ledger: &mut Ledger, username: &str, password: &str) -> ServiceResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(FinanceError::Validation(
                "Username and password are required".into(),
            ));
        }
        if password.chars().count() < 4 {
            return Err(FinanceError::Validation(
                "Password must be at least 4 characters".into(),
            ));
        }
        if ledger.user(username).is_some() {
            return Err(FinanceError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let user = User::new(username, hash_password(password));
        ledger.add_user(user.clone());
        Ok(user)
    }

    /// Verifies credentials and issues a fresh session token, replacing
    /// any earlier one.
    pub fn login(ledger: &mut Ledger, username: &str, password: &str) -> ServiceResult<String> {
        if username.is_empty() || password.is_empty() {
            return Err(FinanceError::Validation(
                "Username and password are required".into(),
            ));
        }
        let hashed = hash_password(password);
        let user = ledger
            .user_mut(username)
            .filter(|user| user.password_hash == hashed)
            .ok_or_else(|| FinanceError::Validation("Invalid username or password".into()))?;
        let token = issue_token();
        user.token = Some(token.clone());
        ledger.touch();
        Ok(token)
    }

    pub fn logout(ledger: &mut Ledger, token: &str) -> ServiceResult<()> {
        let user = ledger
            .user_by_token_mut(token)
            .ok_or_else(|| FinanceError::Validation("Invalid token".into()))?;
        user.token = None;
        ledger.touch();
        Ok(())
    }

    pub fn validate(ledger: &Ledger, token: Option<&str>) -> bool {
        Self::require(ledger, token).is_ok()
    }

    /// Resolves the session token to its user, or fails the way every
    /// protected operation does.
    pub fn require<'a>(ledger: &'a Ledger, token: Option<&str>) -> ServiceResult<&'a User> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(FinanceError::Unauthorized)?;
        ledger
            .users
            .iter()
            .find(|user| user.token.as_deref() == Some(token))
            .ok_or(FinanceError::Unauthorized)
    }
}

fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn issue_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
