use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgGroup, Parser};
use jaas_jwt::input::{DEFAULT_EXPIRY_SECS, DEFAULT_NOT_BEFORE_SKEW_SECS};
use jaas_jwt::{ClaimsInput, KeyEncoding, KeyFormatError, SigningKey};
use thiserror::Error;

/// JaaS JWT generator
///
/// Signs a room access token for the JaaS video conferencing platform and
/// prints it to stdout. Every option can also be given through the
/// environment variable listed next to it.
///
/// API keys and private keys are managed at https://jaas.8x8.vc/#/apikeys
#[derive(Parser, Debug)]
#[clap(name = "jaas-jwt", version)]
#[clap(group = ArgGroup::new("key_source").required(true))]
pub struct Opt {
    /// Path to the RSA private key (PEM, PKCS#1 or PKCS#8).
    #[clap(
        long = "private-key-file",
        short = 'k',
        env = "JAAS_PRIVATE_KEY_FILE",
        group = "key_source"
    )]
    pub private_key_file: Option<PathBuf>,

    /// The RSA private key itself, as PEM text. Literal `\n` sequences are
    /// accepted in place of newlines.
    #[clap(
        long = "private-key",
        env = "JAAS_PRIVATE_KEY",
        hide_env_values = true,
        allow_hyphen_values = true,
        group = "key_source"
    )]
    pub private_key: Option<String>,

    /// Key encoding. Detected from the PEM header when omitted.
    #[arg(long = "key-encoding", env = "JAAS_KEY_ENCODING", value_parser = parse_key_encoding)]
    pub key_encoding: Option<KeyEncoding>,

    /// API key id, sent as the `kid` header.
    #[clap(long = "api-key", env = "JAAS_API_KEY")]
    pub api_key: String,

    /// AppID (previously tenant name), sent as `sub`.
    #[clap(long = "app-id", env = "JAAS_APP_ID")]
    pub app_id: String,

    /// Unique user id on your side. A random UUID when omitted.
    #[clap(long = "user-id", env = "JAAS_USER_ID")]
    pub user_id: Option<String>,

    #[clap(long = "user-name", env = "JAAS_USER_NAME", default_value = "")]
    pub user_name: String,

    #[clap(long = "user-email", env = "JAAS_USER_EMAIL", default_value = "")]
    pub user_email: String,

    #[clap(long = "user-avatar-url", env = "JAAS_USER_AVATAR_URL", default_value = "")]
    pub user_avatar_url: String,

    /// Whether the user joins as moderator.
    #[arg(long, env = "JAAS_USER_IS_MODERATOR", default_value_t = true, action = clap::ArgAction::Set)]
    pub moderator: bool,

    /// Enable live streaming.
    #[clap(long, env = "JAAS_LIVESTREAMING")]
    pub livestreaming: bool,

    /// Enable recording.
    #[clap(long, env = "JAAS_RECORDING")]
    pub recording: bool,

    /// Enable transcription.
    #[clap(long, env = "JAAS_TRANSCRIPTION")]
    pub transcription: bool,

    /// Enable outbound calls.
    #[clap(long = "outbound-call", env = "JAAS_OUTBOUND_CALL")]
    pub outbound_call: bool,

    /// Any other feature flag, e.g. `--feature sip-inbound-call=true`.
    /// Can be repeated. Wins over the dedicated flags above.
    #[clap(long = "feature", value_name = "NAME=BOOL")]
    pub features: Vec<FeatureArg>,

    /// Room name, `*` for every room.
    #[clap(long = "room", env = "JAAS_ROOM", default_value = "*")]
    pub room: String,

    /// Seconds until the token expires.
    #[arg(long = "expiry-secs", env = "JAAS_EXPIRY_SECS", default_value_t = DEFAULT_EXPIRY_SECS)]
    pub expiry_secs: u32,

    /// Seconds `nbf` is backdated by.
    #[arg(long = "nbf-skew-secs", env = "JAAS_NBF_SKEW_SECS", default_value_t = DEFAULT_NOT_BEFORE_SKEW_SECS)]
    pub nbf_skew_secs: u32,
}

/// A `NAME=BOOL` feature flag argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureArg {
    pub name: String,
    pub enabled: bool,
}

#[derive(Error, Debug)]
pub enum ParseFeatureArgError {
    #[error("expected NAME=BOOL, got {0:?}")]
    MissingValue(String),
    #[error("feature name must not be empty")]
    EmptyName,
    #[error("invalid value {0:?} for feature, use true or false")]
    InvalidBool(String),
}

impl FromStr for FeatureArg {
    type Err = ParseFeatureArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| ParseFeatureArgError::MissingValue(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseFeatureArgError::EmptyName);
        }
        let enabled = match value.trim() {
            "true" => true,
            "false" => false,
            other => return Err(ParseFeatureArgError::InvalidBool(other.to_string())),
        };
        Ok(FeatureArg {
            name: name.to_string(),
            enabled,
        })
    }
}

fn parse_key_encoding(s: &str) -> Result<KeyEncoding, String> {
    match s.to_ascii_lowercase().as_str() {
        "pkcs1" => Ok(KeyEncoding::Pkcs1),
        "pkcs8" => Ok(KeyEncoding::Pkcs8),
        _ => Err("Invalid key encoding, please use one of [pkcs1, pkcs8]".to_string()),
    }
}

impl Opt {
    /// The claim values described by these options.
    pub fn claims_input(&self) -> ClaimsInput {
        let mut input = ClaimsInput::new(self.api_key.clone(), self.app_id.clone());
        if let Some(user_id) = &self.user_id {
            input.user_id = user_id.clone();
        }
        input.user_name = self.user_name.clone();
        input.user_email = self.user_email.clone();
        input.user_avatar_url = self.user_avatar_url.clone();
        input.user_is_moderator = self.moderator;
        input.room_name = self.room.clone();
        input.expiry_secs = self.expiry_secs;
        input.not_before_skew_secs = self.nbf_skew_secs;

        input.features.livestreaming = self.livestreaming;
        input.features.recording = self.recording;
        input.features.transcription = self.transcription;
        input.features.outbound_call = self.outbound_call;
        for feature in &self.features {
            input.features.set(&feature.name, feature.enabled);
        }
        input
    }

    /// Load the private key from whichever source was given.
    pub fn signing_key(&self) -> Result<SigningKey, KeyFormatError> {
        if let Some(path) = &self.private_key_file {
            return SigningKey::from_file(path, self.key_encoding);
        }

        let pem = self
            .private_key
            .as_deref()
            .unwrap_or_default()
            .replace("\\n", "\n");
        match self.key_encoding {
            Some(encoding) => SigningKey::from_pem_with(&pem, encoding),
            None => SigningKey::from_pem(&pem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PKCS1_PEM: &str = include_str!("../../jaas-jwt/tests/fixtures/test-key-pkcs1.pem");

    fn parse(extra: &[&str]) -> Result<Opt, clap::Error> {
        let mut args = vec![
            "jaas-jwt",
            "--private-key-file",
            "rsa-private.pem",
            "--api-key",
            "k1",
            "--app-id",
            "a1",
        ];
        args.extend_from_slice(extra);
        Opt::try_parse_from(args)
    }

    #[test]
    fn defaults_map_onto_claims_input() {
        let input = parse(&[]).unwrap().claims_input();
        assert_eq!(input.api_key, "k1");
        assert_eq!(input.app_id, "a1");
        assert!(input.user_is_moderator);
        assert_eq!(input.room_name, "*");
        assert_eq!(input.expiry_secs, 7200);
        assert_eq!(input.not_before_skew_secs, 10);
        assert!(!input.features.livestreaming);
        assert!(!input.features.recording);
        assert!(!input.features.transcription);
        assert!(!input.features.outbound_call);
        assert!(!input.user_id.is_empty());
        assert_eq!(input.user_avatar_url, "");
    }

    #[test]
    fn flags_override_defaults() {
        let opt = parse(&[
            "--user-id",
            "u1",
            "--user-name",
            "Alice",
            "--moderator",
            "false",
            "--recording",
            "--outbound-call",
            "--room",
            "standup",
            "--expiry-secs",
            "600",
            "--nbf-skew-secs",
            "0",
        ])
        .unwrap();
        let input = opt.claims_input();

        assert_eq!(input.user_id, "u1");
        assert_eq!(input.user_name, "Alice");
        assert!(!input.user_is_moderator);
        assert!(input.features.recording);
        assert!(input.features.outbound_call);
        assert!(!input.features.livestreaming);
        assert_eq!(input.room_name, "standup");
        assert_eq!(input.expiry_secs, 600);
        assert_eq!(input.not_before_skew_secs, 0);
    }

    #[test]
    fn generic_features_are_collected() {
        let opt = parse(&[
            "--feature",
            "sip-inbound-call=true",
            "--feature",
            "recording=true",
        ])
        .unwrap();
        let input = opt.claims_input();

        assert!(input.features.recording);
        assert_eq!(
            input.features.additional.get("sip-inbound-call"),
            Some(&true)
        );
    }

    #[test]
    fn feature_arg_parsing() {
        assert_eq!(
            "flip=false".parse::<FeatureArg>().unwrap(),
            FeatureArg {
                name: "flip".to_string(),
                enabled: false
            }
        );
        assert!(matches!(
            "flip".parse::<FeatureArg>(),
            Err(ParseFeatureArgError::MissingValue(_))
        ));
        assert!(matches!(
            "=true".parse::<FeatureArg>(),
            Err(ParseFeatureArgError::EmptyName)
        ));
        assert!(matches!(
            "flip=yes".parse::<FeatureArg>(),
            Err(ParseFeatureArgError::InvalidBool(_))
        ));
    }

    #[test]
    fn key_source_is_required_and_exclusive() {
        assert!(Opt::try_parse_from(["jaas-jwt", "--api-key", "k1", "--app-id", "a1"]).is_err());
        assert!(parse(&["--private-key", "pem"]).is_err());
    }

    #[test]
    fn key_encoding_values() {
        let opt = parse(&["--key-encoding", "PKCS8"]).unwrap();
        assert_eq!(opt.key_encoding, Some(KeyEncoding::Pkcs8));
        assert!(parse(&["--key-encoding", "der"]).is_err());
    }

    #[test]
    fn literal_key_with_escaped_newlines_loads() {
        let escaped = PKCS1_PEM.replace('\n', "\\n");
        let opt = Opt::try_parse_from([
            "jaas-jwt",
            "--private-key",
            escaped.as_str(),
            "--api-key",
            "k1",
            "--app-id",
            "a1",
        ])
        .unwrap();

        let key = opt.signing_key().expect("literal key should load");
        assert_eq!(key.encoding(), KeyEncoding::Pkcs1);
    }

    #[test]
    fn missing_key_file_is_reported() {
        let opt = parse(&[]).unwrap();
        assert!(matches!(
            opt.signing_key(),
            Err(KeyFormatError::Unreadable { .. })
        ));
    }
}
