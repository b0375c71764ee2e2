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

//! Payload types for JaaS room access tokens.
//!
//! This crate defines the wire contract between whoever signs a JaaS token and
//! the JaaS platform that verifies it. It carries no crypto and no I/O.

pub mod flag;
pub mod token;

pub use flag::StringBool;
pub use token::{FeatureClaims, TokenClaims, TokenContext, UserClaims};
