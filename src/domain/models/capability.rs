//! Capability tags for cache providers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A group of operations a provider may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// `exists`, `get`, `string`, `set`, `set_expires`, `delete`.
    KeyValue,
    /// `batch_delete`.
    BatchDelete,
    /// Real per-entry expiry for `set_expires`.
    Expiry,
    /// `hset`, `hget`.
    Hash,
    /// `hget_all`, `hdelete`, `hexists`.
    HashFields,
    /// `xadd`, `xgroup`, `xread_group`, `xread`, `xack`.
    Stream,
    /// `eval`.
    Scripting,
    /// `operate`.
    RawCommand,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::KeyValue,
        Self::BatchDelete,
        Self::Expiry,
        Self::Hash,
        Self::HashFields,
        Self::Stream,
        Self::Scripting,
        Self::RawCommand,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::KeyValue => "key_value",
            Self::BatchDelete => "batch_delete",
            Self::Expiry => "expiry",
            Self::Hash => "hash",
            Self::HashFields => "hash_fields",
            Self::Stream => "stream",
            Self::Scripting => "scripting",
            Self::RawCommand => "raw_command",
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of [`Capability`] values, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet(u16);

impl CapabilitySet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every capability.
    pub const fn all() -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < Capability::ALL.len() {
            bits |= Capability::ALL[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Builder-style insert.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub const fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained capabilities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}
