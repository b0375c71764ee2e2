/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! JaaS room access token signer.
//!
//! Turns a [`ClaimsInput`] and an RSA [`SigningKey`] into a compact RS256 JWT
//! that the JaaS platform accepts. The `jaas-jwt` binary is a thin wrapper
//! around [`sign_token`].

pub mod error;
pub mod input;
pub mod key;
pub mod token;

pub use error::{KeyFormatError, TokenError};
pub use input::{ClaimsInput, FeatureFlags};
pub use key::{KeyEncoding, SigningKey};
pub use token::{assemble_claims, build_header, sign_token, sign_token_at};

pub use jaas_jwt_types as types;
