use std::collections::HashMap;

use tracing::warn;

use crate::message::MessageIdentity;

/// Bidirectional `(name, crc) <-> message id` table announced by the engine.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    by_identity: HashMap<MessageIdentity, u16>,
    by_id: HashMap<u16, MessageIdentity>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, "name_crc")` entries. Malformed entries are skipped.
    pub fn from_table<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: AsRef<str>,
    {
        let mut catalogue = Self::new();
        for (id, entry) in entries {
            match MessageIdentity::parse(entry.as_ref()) {
                Some(identity) => catalogue.insert(identity, id),
                None => warn!(id, entry = entry.as_ref(), "skipping malformed message table entry"),
            }
        }
        catalogue
    }

    pub fn insert(&mut self, identity: MessageIdentity, id: u16) {
        if let Some(previous) = self.by_id.insert(id, identity.clone()) {
            self.by_identity.remove(&previous);
        }
        self.by_identity.insert(identity, id);
    }

    pub fn id_of(&self, identity: &MessageIdentity) -> Option<u16> {
        self.by_identity.get(identity).copied()
    }

    pub fn identity_of(&self, id: u16) -> Option<&MessageIdentity> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, identity: &MessageIdentity) -> bool {
        self.by_identity.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Entries ordered by message id.
    pub fn entries(&self) -> Vec<(u16, &MessageIdentity)> {
        let mut entries: Vec<_> = self.by_id.iter().map(|(id, ident)| (*id, ident)).collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}
