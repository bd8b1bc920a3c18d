pub mod auth;
pub mod like;
pub mod post;
pub mod user;

use crate::model::{auth::InvalidAuthTokenHashError, user::InvalidUserHandleError};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    UserHandle(#[from] InvalidUserHandleError),
    #[error(transparent)]
    TokenHash(#[from] InvalidAuthTokenHashError),
}

/// Row id of some entity, tagged with a marker type so post and user ids can't be mixed up.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id<Marker>(u64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id as stored in a postgres `BIGINT` column.
    #[must_use]
    pub fn to_db(self) -> i64 {
        self.0.cast_signed()
    }

    #[must_use]
    pub fn from_db(value: i64) -> Self {
        Self::new(value.cast_unsigned())
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, post::PostMarker};

    #[test]
    fn id_serializes_as_plain_number() {
        let id = Id::<PostMarker>::new(42);

        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<Id<PostMarker>>("42").unwrap(), id);
    }

    #[test]
    fn id_db_conversion() {
        let large = Id::<PostMarker>::new(u64::MAX - 3);

        assert_eq!(Id::<PostMarker>::from_db(large.to_db()), large);
        assert_eq!(Id::<PostMarker>::new(17).to_db(), 17);
    }
}
