//! Verification code issuance and SMS login.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use su_shared::utils::phone::{is_valid_phone, mask_phone_number};
use tracing::{error, info, warn};

use super::config::SmsLoginConfig;
use super::traits::{CodeCheck, CodeStore, SmsSender};
use crate::domain::entities::user::NewUser;
use crate::domain::entities::verification_code::VerificationCode;
use crate::domain::value_objects::auth_session::{AuthSession, CodeDispatch, SmsLoginResult};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

/// Sends verification codes and logs users in with them.
///
/// Login by code doubles as registration: an unknown phone number gets a
/// student account provisioned on the spot.
pub struct SmsLoginService<U, C> {
    user_repository: Arc<U>,
    code_store: Arc<C>,
    sms_sender: Arc<dyn SmsSender>,
    token_service: Arc<TokenService>,
    config: SmsLoginConfig,
}

impl<U, C> SmsLoginService<U, C>
where
    U: UserRepository,
    C: CodeStore,
{
    pub fn new(
        user_repository: Arc<U>,
        code_store: Arc<C>,
        sms_sender: Arc<dyn SmsSender>,
        token_service: Arc<TokenService>,
        config: SmsLoginConfig,
    ) -> Self {
        Self {
            user_repository,
            code_store,
            sms_sender,
            token_service,
            config,
        }
    }

    /// Generates a uniformly random 6-digit code from the OS RNG.
    pub fn generate_secure_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let number = u32::from_be_bytes(bytes) % 1_000_000;
        format!("{:06}", number)
    }

    /// Sends a fresh verification code to `phone`.
    ///
    /// The code is stored and the resend cooldown started only after the
    /// gateway accepted the message. A failed delivery therefore leaves
    /// any previously sent code valid and does not cost the caller their
    /// next send slot.
    pub async fn send_verification_code(&self, phone: &str) -> DomainResult<CodeDispatch> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
            }
            .into());
        }

        if let Some(retry_after) = self.code_store.resend_cooldown_remaining(phone).await? {
            warn!(
                phone = %mask_phone_number(phone),
                retry_after_seconds = retry_after,
                event = "sms_rate_limited",
                "Verification code resend throttled"
            );
            return Err(AuthError::RateLimitExceeded {
                retry_after_seconds: retry_after,
            }
            .into());
        }

        let code = Self::generate_secure_code();
        let message = format!(
            "Your SkillUp verification code is {}. It expires in {} minutes.",
            code,
            self.config.code_ttl_seconds / 60
        );

        let message_id = match self.sms_sender.send(phone, &message).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    phone = %mask_phone_number(phone),
                    error = %e,
                    event = "sms_delivery_failed",
                    "Verification code delivery failed"
                );
                return Err(AuthError::SmsDeliveryFailed.into());
            }
        };

        self.code_store
            .store_code(VerificationCode::new(
                phone,
                code,
                self.config.code_ttl_seconds,
            ))
            .await?;
        self.code_store
            .mark_sent(phone, self.config.resend_interval_seconds)
            .await?;

        info!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            event = "verification_code_sent",
            "Verification code sent"
        );
        Ok(CodeDispatch {
            message_id,
            expires_in_seconds: self.config.code_ttl_seconds,
            resend_after_seconds: self.config.resend_interval_seconds,
        })
    }

    /// Logs in with a verification code, provisioning the account if the
    /// phone number is unknown.
    pub async fn verify_and_login(&self, phone: &str, submitted: &str) -> DomainResult<SmsLoginResult> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
            }
            .into());
        }

        match self.code_store.check_code(phone, submitted).await? {
            CodeCheck::NotFound => {
                warn!(
                    phone = %mask_phone_number(phone),
                    event = "sms_code_not_found",
                    "Login attempted without an active verification code"
                );
                Err(AuthError::CodeNotFound.into())
            }
            CodeCheck::Mismatch { remaining_attempts } => {
                warn!(
                    phone = %mask_phone_number(phone),
                    remaining_attempts,
                    event = "sms_code_mismatch",
                    "Wrong verification code submitted"
                );
                Err(AuthError::CodeMismatch { remaining_attempts }.into())
            }
            CodeCheck::Valid => self.login_verified_phone(phone).await,
        }
    }

    async fn login_verified_phone(&self, phone: &str) -> DomainResult<SmsLoginResult> {
        let (user, is_new_user) = match self.user_repository.find_by_phone(phone).await? {
            Some(user) => {
                if user.is_suspended() {
                    warn!(
                        user_id = user.id,
                        event = "login_rejected_suspended",
                        "Suspended account attempted SMS login"
                    );
                    return Err(AuthError::AccountSuspended.into());
                }
                (user, false)
            }
            None => {
                let user = self
                    .user_repository
                    .insert(NewUser::provisioned_student(phone))
                    .await?;
                info!(
                    user_id = user.id,
                    event = "user_provisioned",
                    "Account auto-provisioned by SMS login"
                );
                (user, true)
            }
        };

        let token = self.token_service.issue(user.id, user.role)?;
        info!(
            user_id = user.id,
            is_new_user,
            event = "login_success_sms",
            "SMS login succeeded"
        );

        Ok(SmsLoginResult {
            session: AuthSession {
                token,
                user_id: user.id,
                role: user.role,
                expires_in: self.token_service.expiry_seconds(),
            },
            is_new_user,
        })
    }
}
