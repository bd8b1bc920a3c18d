//! Bearer tokens and the sessions they resolve to.
//!
//! A token is `AUTH_TOKEN_SECRET_LEN` random bytes followed by `AUTH_TOKEN_SALT_LEN`
//! bytes of salt, sent as unpadded url-safe base64. Only the argon2 hash of the secret
//! is stored, so a leaked sessions table does not leak usable tokens.

use crate::model::{Id, user::UserMarker};
use argon2::{Argon2, Params};
use base64::{DecodeError, Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use std::{
    fmt::{Debug, Formatter},
    str::FromStr,
};
use thiserror::Error;
use time::OffsetDateTime;

pub const AUTH_TOKEN_SECRET_LEN: usize = 24;
pub const AUTH_TOKEN_SALT_LEN: usize = 16;
pub const AUTH_TOKEN_HASH_LEN: usize = Params::DEFAULT_OUTPUT_LEN;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("Hashing auth token failed: {0}")]
pub struct AuthTokenHashError(argon2::Error);

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum AuthTokenDecodeError {
    #[error("Decoding base64 failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("Token was {0} bytes long")]
    InvalidLength(usize),
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AuthToken {
    secret: [u8; AUTH_TOKEN_SECRET_LEN],
    salt: [u8; AUTH_TOKEN_SALT_LEN],
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AuthTokenHash(pub Box<[u8; AUTH_TOKEN_HASH_LEN]>);

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Authentication {
    pub user: Id<UserMarker>,
    pub token_hash: AuthTokenHash,
    pub created_at: OffsetDateTime,
    pub expires_at: Option<OffsetDateTime>,
}

impl AuthToken {
    #[must_use]
    pub fn generate_random() -> Self {
        Self {
            secret: rand::random(),
            salt: rand::random(),
        }
    }

    #[must_use]
    pub fn as_token_str(&self) -> String {
        let mut bytes = [0; AUTH_TOKEN_SECRET_LEN + AUTH_TOKEN_SALT_LEN];
        bytes[..AUTH_TOKEN_SECRET_LEN].copy_from_slice(&self.secret);
        bytes[AUTH_TOKEN_SECRET_LEN..].copy_from_slice(&self.salt);

        BASE64_URL_SAFE_NO_PAD.encode(bytes)
    }

    pub fn hash(&self) -> Result<AuthTokenHash, AuthTokenHashError> {
        let mut hash = Box::new([0; AUTH_TOKEN_HASH_LEN]);
        Argon2::default()
            .hash_password_into(&self.secret, &self.salt, &mut *hash)
            .map_err(AuthTokenHashError)?;

        Ok(AuthTokenHash(hash))
    }
}

impl FromStr for AuthToken {
    type Err = AuthTokenDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = BASE64_URL_SAFE_NO_PAD.decode(s)?;
        if bytes.len() != AUTH_TOKEN_SECRET_LEN + AUTH_TOKEN_SALT_LEN {
            return Err(Self::Err::InvalidLength(bytes.len()));
        }

        let (secret, salt) = bytes.split_at(AUTH_TOKEN_SECRET_LEN);
        Ok(Self {
            secret: secret.try_into().map_err(|_| Self::Err::InvalidLength(bytes.len()))?,
            salt: salt.try_into().map_err(|_| Self::Err::InvalidLength(bytes.len()))?,
        })
    }
}

impl Authentication {
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl Debug for AuthToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("secret", &"[redacted]")
            .field("salt", &"[redacted]")
            .finish()
    }
}

impl Debug for AuthTokenHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthTokenHash").field(&"[redacted]").finish()
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The auth token hash had an invalid length")]
pub struct InvalidAuthTokenHashError;

impl TryFrom<Vec<u8>> for AuthTokenHash {
    type Error = InvalidAuthTokenHashError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let hash: Box<[u8]> = value.into_boxed_slice();
        Ok(Self(hash.try_into().map_err(|_| InvalidAuthTokenHashError)?))
    }
}
