// src/storage/memory.rs
use crate::storage::KeyValueStore;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

// In-memory store, one map per value kind like the namespaces a remote
// store would hold. Concurrent callers go through dashmap; last writer
// wins on a contended key, same as the shared store would behave.
#[derive(Default)]
pub struct MemoryStore {
    strings: DashMap<String, String>,
    hashes: DashMap<String, HashMap<String, String>>,
    sets: DashMap<String, HashSet<String>>,
}

// '*' matches any run of characters; no other metacharacters.
fn glob_match(pattern: &str, key: &str) -> bool {
    fn inner(pattern: &[u8], key: &[u8]) -> bool {
        match (pattern.first(), key.first()) {
            (None, None) => true,
            (Some(b'*'), _) => {
                inner(&pattern[1..], key) || (!key.is_empty() && inner(pattern, &key[1..]))
            }
            (Some(p), Some(k)) if p == k => inner(&pattern[1..], &key[1..]),
            _ => false,
        }
    }
    inner(pattern.as_bytes(), key.as_bytes())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Heartbeat records are written by the server processes themselves,
    // outside the reconciliation core; this is their entry point (and the
    // test suite's).
    pub fn set_string(&self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    pub fn set_members(&self, key: &str) -> HashSet<String> {
        self.sets
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn scan_keys(&self, pattern: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .strings
            .iter()
            .map(|entry| entry.key().clone())
            .chain(self.hashes.iter().map(|entry| entry.key().clone()))
            .chain(self.sets.iter().map(|entry| entry.key().clone()))
            .filter(|key| glob_match(pattern, key))
            .collect();
        keys.sort();
        keys
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).map(|entry| entry.value().clone())
    }

    fn get_hash(&self, key: &str) -> Option<HashMap<String, String>> {
        self.hashes.get(key).map(|entry| entry.value().clone())
    }

    fn set_hash(&self, key: &str, fields: HashMap<String, String>) {
        self.hashes
            .entry(key.to_string())
            .or_default()
            .extend(fields);
    }

    fn delete_key(&self, key: &str) {
        self.strings.remove(key);
        self.hashes.remove(key);
        self.sets.remove(key);
    }

    fn add_to_set(&self, key: &str, member: &str) {
        self.sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
    }

    fn remove_from_set(&self, key: &str, member: &str) {
        if let Some(mut members) = self.sets.get_mut(key) {
            members.remove(member);
        }
    }
}
