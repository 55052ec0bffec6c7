//! Identifier interning for raw user and item ids
//!
//! Raw identifiers in the review corpus are arbitrary strings. The engine
//! stores biases and factors in dense arrays, so each namespace (users,
//! items) gets its own bidirectional mapping between raw ids and zero-based
//! internal indices. The mapping is built once from the full training set
//! and is immutable afterwards: a raw id that was never interned during
//! training is rejected at serving time, not silently inserted.

use std::collections::HashMap;
use tasterank_core::{Result, TasteRankError};

/// Identifier namespace. Users and items have independent index spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    User,
    Item,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::User => "user",
            Namespace::Item => "item",
        }
    }
}

/// Bidirectional raw id <-> internal index mapping for one namespace
#[derive(Debug, Clone)]
pub struct IdIndex {
    namespace: Namespace,
    forward: HashMap<String, u32>,
    reverse: Vec<String>,
}

impl IdIndex {
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            forward: HashMap::new(),
            reverse: Vec::new(),
        }
    }

    /// Assign a fresh sequential index the first time a raw id is seen,
    /// otherwise return the existing one. Only used during construction.
    pub fn intern(&mut self, raw: &str) -> u32 {
        if let Some(&internal) = self.forward.get(raw) {
            return internal;
        }
        let internal = self.reverse.len() as u32;
        self.forward.insert(raw.to_string(), internal);
        self.reverse.push(raw.to_string());
        internal
    }

    /// Lookup-only resolution for serving time.
    ///
    /// # Errors
    ///
    /// Returns `UnknownIdentifier` if the raw id was never interned.
    pub fn to_internal(&self, raw: &str) -> Result<u32> {
        self.forward
            .get(raw)
            .copied()
            .ok_or_else(|| TasteRankError::unknown_identifier(self.namespace.as_str(), raw))
    }

    /// Reverse lookup. Always succeeds for indices in `[0, len)`.
    pub fn to_raw(&self, internal: u32) -> Option<&str> {
        self.reverse.get(internal as usize).map(String::as_str)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Raw ids in internal-index order, for artifact serialization.
    pub fn raw_ids(&self) -> &[String] {
        &self.reverse
    }

    /// Rebuild an index from its serialized raw-id table.
    pub(crate) fn from_raw_ids(namespace: Namespace, raw_ids: Vec<String>) -> Self {
        let forward = raw_ids
            .iter()
            .enumerate()
            .map(|(internal, raw)| (raw.clone(), internal as u32))
            .collect();
        Self {
            namespace,
            forward,
            reverse: raw_ids,
        }
    }
}
