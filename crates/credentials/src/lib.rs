//! Credential handling for the account service.
//!
//! This crate provides:
//! - Password hashing and verification behind the [`CredentialHasher`] trait
//! - Opaque bearer-token generation behind the [`TokenIssuer`] trait
//! - Password strength policy and email normalization

mod email;
mod error;
mod hasher;
mod policy;
mod token;

pub use email::*;
pub use error::*;
pub use hasher::*;
pub use policy::*;
pub use token::*;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 5;

/// Number of random bytes behind a default opaque token.
pub const DEFAULT_TOKEN_BYTES: usize = 32;
