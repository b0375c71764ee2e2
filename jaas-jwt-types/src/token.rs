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

//! JaaS room access token (JWT) claims.
//!
//! The token is an RS256-signed JWT. The platform looks up the public key by
//! the header `kid` (the API key), then reads the tenant from `sub`, the room
//! from `room` and the participant from `context.user`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flag::StringBool;

/// JWT payload for a JaaS room access token.
///
/// Field order is the serialized order.
///
/// # Example payload
///
/// ```json
/// {
///   "aud": "jitsi",
///   "iss": "chat",
///   "sub": "vpaas-magic-cookie-1234",
///   "room": "*",
///   "exp": 1700007200,
///   "nbf": 1699999990,
///   "context": {
///     "user": {
///       "id": "8c0f6c4e-3c43-4d3b-9b44-6b0c4b1f7d1a",
///       "name": "Alice",
///       "email": "alice@example.com",
///       "avatar": "",
///       "moderator": "true"
///     },
///     "features": {
///       "livestreaming": "false",
///       "recording": "true",
///       "transcription": "false",
///       "outbound-call": "false"
///     }
///   }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Always [`TokenClaims::AUDIENCE`].
    pub aud: String,

    /// Always [`TokenClaims::ISSUER`].
    pub iss: String,

    /// Tenant / AppID.
    pub sub: String,

    /// Room the token grants access to. [`TokenClaims::ANY_ROOM`] matches every room.
    pub room: String,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,

    /// Not-before timestamp (Unix seconds).
    pub nbf: i64,

    pub context: TokenContext,
}

impl TokenClaims {
    /// Audience the JaaS platform expects.
    pub const AUDIENCE: &'static str = "jitsi";

    /// Issuer the JaaS platform expects.
    pub const ISSUER: &'static str = "chat";

    /// Wildcard room name.
    pub const ANY_ROOM: &'static str = "*";
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenContext {
    pub user: UserClaims,
    pub features: FeatureClaims,
}

/// The participant the token is issued for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserClaims {
    /// Caller-side unique user identifier.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Avatar URL. Empty is allowed.
    pub avatar: String,
    pub moderator: StringBool,
}

/// Platform features enabled for the participant.
///
/// The four named flags are always emitted. Extra platform flags go in
/// `additional` and are emitted after them, in key order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct FeatureClaims {
    pub livestreaming: StringBool,
    pub recording: StringBool,
    pub transcription: StringBool,
    #[serde(rename = "outbound-call")]
    pub outbound_call: StringBool,
    #[serde(flatten)]
    pub additional: BTreeMap<String, StringBool>,
}

impl FeatureClaims {
    pub const LIVESTREAMING: &'static str = "livestreaming";
    pub const RECORDING: &'static str = "recording";
    pub const TRANSCRIPTION: &'static str = "transcription";
    pub const OUTBOUND_CALL: &'static str = "outbound-call";

    /// Whether `name` is one of the four named flags.
    pub fn is_named(name: &str) -> bool {
        matches!(
            name,
            Self::LIVESTREAMING | Self::RECORDING | Self::TRANSCRIPTION | Self::OUTBOUND_CALL
        )
    }
}
