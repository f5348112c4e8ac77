//! Domain entities representing core business objects.

pub mod login_attempt;
pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use login_attempt::LoginAttemptRecord;
pub use token::{Claims, DEFAULT_TOKEN_EXPIRY_HOURS};
pub use user::{NewUser, User, UserRole, UserStatus};
pub use verification_code::{VerificationCode, CODE_LENGTH, DEFAULT_CODE_TTL_SECONDS, MAX_CODE_ATTEMPTS};
