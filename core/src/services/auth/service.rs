//! Password login, token verification, and logout.

use std::sync::Arc;

use su_shared::utils::phone::mask_phone_number;
use tracing::{info, warn};

use crate::domain::value_objects::auth_session::{AuthSession, AuthenticatedUser, CurrentUser};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{RevokedTokenRepository, UserRepository};
use crate::services::guard::{LoginAttemptStore, SecurityGuard};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

/// Orchestrates the password login flow and session lifecycle.
///
/// The ordering inside [`authenticate`](AuthService::authenticate) is
/// load-bearing: the lockout check runs before any repository access,
/// and unknown identifiers take the same failure path as wrong
/// passwords so the two cases stay indistinguishable to callers.
pub struct AuthService<U, S, B> {
    user_repository: Arc<U>,
    security_guard: Arc<SecurityGuard<S, B>>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<U, S, B> AuthService<U, S, B>
where
    U: UserRepository,
    S: LoginAttemptStore,
    B: RevokedTokenRepository,
{
    pub fn new(
        user_repository: Arc<U>,
        security_guard: Arc<SecurityGuard<S, B>>,
        token_service: Arc<TokenService>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            user_repository,
            security_guard,
            token_service,
            password_hasher,
        }
    }

    /// Checks credentials for the phone number and records the outcome
    /// with the security guard.
    pub async fn authenticate(
        &self,
        phone: &str,
        password: &str,
    ) -> DomainResult<AuthenticatedUser> {
        if phone.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        if self.security_guard.is_account_locked(phone).await? {
            let remaining = self.security_guard.remaining_lockout_seconds(phone).await?;
            warn!(
                phone = %mask_phone_number(phone),
                remaining_seconds = remaining,
                event = "login_blocked_locked",
                "Login attempt against a locked account"
            );
            return Err(AuthError::AccountLocked {
                remaining_seconds: remaining,
            }
            .into());
        }

        let user = match self.user_repository.find_by_phone(phone).await? {
            Some(user) => user,
            None => {
                self.security_guard.record_login_attempt(phone, false).await?;
                warn!(
                    phone = %mask_phone_number(phone),
                    event = "login_failed",
                    "Password login failed"
                );
                return Err(AuthError::AuthenticationFailed.into());
            }
        };

        // Accounts without a password (SMS signups) fail like any wrong password
        let credentials_ok = user
            .password_hash
            .as_deref()
            .map(|hash| self.password_hasher.verify(password, hash))
            .unwrap_or(false);

        if !credentials_ok {
            self.security_guard.record_login_attempt(phone, false).await?;
            warn!(
                user_id = user.id,
                event = "login_failed",
                "Password login failed"
            );
            return Err(AuthError::AuthenticationFailed.into());
        }

        if user.is_suspended() {
            // A suspension rejection is not a credential failure and does
            // not advance the lockout counter
            warn!(
                user_id = user.id,
                event = "login_rejected_suspended",
                "Suspended account attempted password login"
            );
            return Err(AuthError::AccountSuspended.into());
        }

        self.security_guard.record_login_attempt(phone, true).await?;
        info!(user_id = user.id, event = "login_success", "Password login succeeded");
        Ok(AuthenticatedUser::from(&user))
    }

    /// Full password login: authenticate, then issue a session token.
    pub async fn login_with_password(&self, phone: &str, password: &str) -> DomainResult<AuthSession> {
        let authenticated = self.authenticate(phone, password).await?;
        let token = self
            .token_service
            .issue(authenticated.user_id, authenticated.role)?;

        Ok(AuthSession {
            token,
            user_id: authenticated.user_id,
            role: authenticated.role,
            expires_in: self.token_service.expiry_seconds(),
        })
    }

    /// Resolves a session token to the current account state.
    ///
    /// The blacklist is consulted before any decode work, so a revoked
    /// token is reported as revoked even when it is also expired. Role
    /// and status come from storage, not from the claims, so role
    /// changes and suspensions take effect on the next request.
    pub async fn verify_token(&self, token: &str) -> DomainResult<CurrentUser> {
        if self.security_guard.is_token_blacklisted(token).await {
            return Err(TokenError::TokenRevoked.into());
        }

        let claims = self.token_service.validate(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_suspended() {
            return Err(AuthError::AccountSuspended.into());
        }

        Ok(CurrentUser::from(&user))
    }

    /// Revokes a session token.
    ///
    /// An expired token is still blacklisted and the logout reports
    /// success. Tokens that fail signature or format checks are not
    /// blacklisted; those logouts fail.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        match self.token_service.validate(token) {
            Ok(claims) => {
                self.security_guard.add_token_to_blacklist(token).await?;
                info!(user_id = %claims.sub, event = "logout", "User logged out");
                Ok(())
            }
            Err(DomainError::Token(TokenError::TokenExpired)) => {
                self.security_guard.add_token_to_blacklist(token).await?;
                if let Ok(claims) = self.token_service.decode_ignoring_expiry(token) {
                    info!(
                        user_id = %claims.sub,
                        event = "logout_expired_token",
                        "Expired session logged out"
                    );
                }
                Ok(())
            }
            Err(err) => {
                warn!(event = "logout_rejected", "Logout with an invalid token");
                Err(err)
            }
        }
    }
}
