//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Signed session token generation and validation
//!
//! Each service defines its own authentication flow and adapts these
//! implementations. This keeps domain logic out of the shared crate while
//! reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionClaims, SessionSigner};
//!
//! let signer = SessionSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = SessionClaims::for_subject(42, 24);
//! let token = signer.issue(&claims).unwrap();
//! let decoded = signer.verify(&token).unwrap();
//! assert_eq!(decoded.sub, "42");
//! ```

pub mod password;
pub mod session;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::SessionClaims;
pub use session::SessionError;
pub use session::SessionSigner;
