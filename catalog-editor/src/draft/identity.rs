//! Local and server identities

use serde::{Deserialize, Serialize};
use shared::models::{ImageId, VariantId};
use std::fmt;
use uuid::Uuid;

/// Locally generated key with no meaning on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalKey(Uuid);

impl LocalKey {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "local:{}", &simple[..8])
    }
}

/// Identity of a draft entity
///
/// `Ephemeral` until the create call for the entity succeeds, `Durable`
/// afterwards. Only durable ids are ever sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Identity<Id> {
    Ephemeral(LocalKey),
    Durable(Id),
}

pub type VariantIdentity = Identity<VariantId>;
pub type ImageIdentity = Identity<ImageId>;

impl<Id: Copy> Identity<Id> {
    pub fn fresh() -> Self {
        Identity::Ephemeral(LocalKey::fresh())
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Identity::Ephemeral(_))
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, Identity::Durable(_))
    }

    pub fn durable(&self) -> Option<Id> {
        match self {
            Identity::Durable(id) => Some(*id),
            Identity::Ephemeral(_) => None,
        }
    }
}

impl<Id: fmt::Display> fmt::Display for Identity<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Ephemeral(key) => write!(f, "{}", key),
            Identity::Durable(id) => write!(f, "{}", id),
        }
    }
}
