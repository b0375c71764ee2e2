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

//! Caller-supplied values that go into one token.

use std::collections::BTreeMap;

use jaas_jwt_types::{FeatureClaims, StringBool, TokenClaims};
use uuid::Uuid;

use crate::error::TokenError;

/// Default token lifetime: two hours.
pub const DEFAULT_EXPIRY_SECS: u32 = 7200;

/// Default backdating of `nbf` to absorb clock drift on the verifier.
pub const DEFAULT_NOT_BEFORE_SKEW_SECS: u32 = 10;

/// Feature flags granted to the participant.
///
/// Every flag defaults to disabled. Flags that are not set here are emitted
/// as `"false"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub livestreaming: bool,
    pub recording: bool,
    pub transcription: bool,
    pub outbound_call: bool,
    /// Any other platform feature, keyed by its wire name.
    pub additional: BTreeMap<String, bool>,
}

impl FeatureFlags {
    /// Set a flag by its wire name.
    pub fn set(&mut self, name: &str, enabled: bool) {
        match name {
            FeatureClaims::LIVESTREAMING => self.livestreaming = enabled,
            FeatureClaims::RECORDING => self.recording = enabled,
            FeatureClaims::TRANSCRIPTION => self.transcription = enabled,
            FeatureClaims::OUTBOUND_CALL => self.outbound_call = enabled,
            other => {
                self.additional.insert(other.to_string(), enabled);
            }
        }
    }

    /// Named flags found in `additional` override the dedicated fields, so
    /// each wire name appears once in the payload.
    pub(crate) fn to_claims(&self) -> FeatureClaims {
        let mut named = self.clone();
        for (name, enabled) in &self.additional {
            if FeatureClaims::is_named(name) {
                named.set(name, *enabled);
            }
        }

        FeatureClaims {
            livestreaming: named.livestreaming.into(),
            recording: named.recording.into(),
            transcription: named.transcription.into(),
            outbound_call: named.outbound_call.into(),
            additional: self
                .additional
                .iter()
                .filter(|(name, _)| !FeatureClaims::is_named(name))
                .map(|(name, enabled)| (name.clone(), StringBool(*enabled)))
                .collect(),
        }
    }
}

/// Everything needed to assemble one token, apart from the signing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsInput {
    /// Header `kid`. Identifies the public key JaaS verifies with.
    pub api_key: String,
    /// Payload `sub`. The tenant / AppID.
    pub app_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_avatar_url: String,
    pub user_is_moderator: bool,
    pub room_name: String,
    pub features: FeatureFlags,
    pub expiry_secs: u32,
    pub not_before_skew_secs: u32,
}

impl ClaimsInput {
    /// Input with the usual defaults: random user id, moderator, any room,
    /// two hour lifetime, ten second skew, all features off.
    pub fn new(api_key: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            app_id: app_id.into(),
            user_id: Uuid::new_v4().to_string(),
            user_name: String::new(),
            user_email: String::new(),
            user_avatar_url: String::new(),
            user_is_moderator: true,
            room_name: TokenClaims::ANY_ROOM.to_string(),
            features: FeatureFlags::default(),
            expiry_secs: DEFAULT_EXPIRY_SECS,
            not_before_skew_secs: DEFAULT_NOT_BEFORE_SKEW_SECS,
        }
    }

    /// Reject inputs that would produce a token JaaS can never accept.
    ///
    /// Besides a blank `api_key` or `app_id`, an empty `room_name` is
    /// rejected (use `"*"` for any room), as is a zero-length validity window
    /// (`expiry_secs + not_before_skew_secs == 0`).
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.api_key.trim().is_empty() {
            return Err(TokenError::InputValidation("api_key is required".into()));
        }
        if self.app_id.trim().is_empty() {
            return Err(TokenError::InputValidation("app_id is required".into()));
        }
        if self.room_name.is_empty() {
            return Err(TokenError::InputValidation(
                "room_name must not be empty (use \"*\" for any room)".into(),
            ));
        }
        if u64::from(self.expiry_secs) + u64::from(self.not_before_skew_secs) == 0 {
            return Err(TokenError::InputValidation(
                "expiry_secs + not_before_skew_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
