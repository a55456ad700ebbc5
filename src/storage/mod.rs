// src/storage/mod.rs
pub mod memory;

use std::collections::HashMap;

// The store boundary. Everything this crate knows about the shared
// key-value store goes through these seven operations; a production
// adapter (Redis or otherwise) implements the same trait. Transport
// failures and retries are the adapter's problem, not this core's.
pub trait KeyValueStore: Send + Sync {
    // Glob-style match, '*' wildcard only.
    fn scan_keys(&self, pattern: &str) -> Vec<String>;

    fn get_string(&self, key: &str) -> Option<String>;

    fn get_hash(&self, key: &str) -> Option<HashMap<String, String>>;

    // HMSET semantics: fields merge into an existing hash, other fields
    // are left alone.
    fn set_hash(&self, key: &str, fields: HashMap<String, String>);

    fn delete_key(&self, key: &str);

    fn add_to_set(&self, key: &str, member: &str);

    fn remove_from_set(&self, key: &str, member: &str);
}
