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

//! JaaS room access token generation.
//!
//! Tokens are signed with the tenant's RSA private key (RS256); JaaS verifies
//! them with the public key registered under the header `kid`.

use chrono::Utc;
use jaas_jwt_types::{StringBool, TokenClaims, TokenContext, UserClaims};
use jsonwebtoken::{encode, Algorithm, Header};

use crate::error::TokenError;
use crate::input::ClaimsInput;
use crate::key::SigningKey;

/// Build the payload for `input` as of `now` (Unix seconds).
///
/// Fails with [`TokenError::InputValidation`] when `exp` or `nbf` would fall
/// outside the `i64` range.
pub fn assemble_claims(input: &ClaimsInput, now: i64) -> Result<TokenClaims, TokenError> {
    let exp = now
        .checked_add(i64::from(input.expiry_secs))
        .ok_or_else(|| TokenError::InputValidation(format!("exp overflows for now={now}")))?;
    let nbf = now
        .checked_sub(i64::from(input.not_before_skew_secs))
        .ok_or_else(|| TokenError::InputValidation(format!("nbf overflows for now={now}")))?;

    let user = UserClaims {
        id: input.user_id.clone(),
        name: input.user_name.clone(),
        email: input.user_email.clone(),
        avatar: input.user_avatar_url.clone(),
        moderator: StringBool(input.user_is_moderator),
    };

    Ok(TokenClaims {
        aud: TokenClaims::AUDIENCE.to_string(),
        iss: TokenClaims::ISSUER.to_string(),
        sub: input.app_id.clone(),
        room: input.room_name.clone(),
        exp,
        nbf,
        context: TokenContext {
            user,
            features: input.features.to_claims(),
        },
    })
}

/// `{"typ":"JWT","alg":"RS256","kid":<api_key>}`
pub fn build_header(api_key: &str) -> Header {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(api_key.to_string());
    header
}

/// Sign a token for `input`, using the current time.
pub fn sign_token(input: &ClaimsInput, key: &SigningKey) -> Result<String, TokenError> {
    sign_token_at(input, key, Utc::now().timestamp())
}

/// Sign a token for `input` as of `now` (Unix seconds).
///
/// `now` is used for both `exp` and `nbf`.
pub fn sign_token_at(
    input: &ClaimsInput,
    key: &SigningKey,
    now: i64,
) -> Result<String, TokenError> {
    input.validate()?;

    let claims = assemble_claims(input, now)?;
    let header = build_header(&input.api_key);

    tracing::debug!(
        kid = %input.api_key,
        sub = %claims.sub,
        room = %claims.room,
        exp = claims.exp,
        nbf = claims.nbf,
        "Signing JaaS token"
    );

    encode(&header, &claims, key.encoding_key()).map_err(|e| {
        tracing::error!("Failed to sign JWT: {e}");
        TokenError::Signing(e.to_string())
    })
}
