//! cache.rs - Explicit memoization of parsed uploads and loaded blacklists.
//!
//! Parsing an upload and fetching the blacklist are the only expensive steps
//! of a run. `SessionCache` remembers both for the lifetime of a session:
//!
//! * tables are keyed by a SHA-256 hash of the file name and content, so the
//!   same upload is parsed once however many times it is processed;
//! * blacklists are keyed by [`BlacklistSource::identity`], so the network is
//!   hit once per source.
//!
//! Nothing is evicted implicitly. Callers drop entries with the `invalidate_*`
//! methods, force a fresh load with the `reload_*` methods, or `clear()`
//! everything.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::blacklist::{load_blacklist, Blacklist, BlacklistSource};
use crate::config::NumberingPlan;
use crate::errors::PhonesanError;
use crate::input::{read_table, LoadedTable};

/// Content hash identifying an upload.
pub fn upload_key(name: &str, bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b":");
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Default)]
pub struct SessionCache {
    tables: HashMap<String, Arc<LoadedTable>>,
    blacklists: HashMap<String, Arc<Blacklist>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed upload, parsing it on first use.
    ///
    /// The result is a copy: the pipeline mutates tables in place and must not
    /// touch the cached original.
    pub fn table(&mut self, name: &str, bytes: &[u8], placeholder: &str) -> Result<LoadedTable, PhonesanError> {
        let key = upload_key(name, bytes);
        if let Some(cached) = self.tables.get(&key) {
            debug!("Serving parsed upload '{}' from cache for key: {}", name, key);
            return Ok(LoadedTable::clone(cached));
        }

        debug!("Upload '{}' not found in cache. Parsing now.", name);
        let loaded = Arc::new(read_table(name, bytes, placeholder)?);
        self.tables.insert(key, Arc::clone(&loaded));
        Ok(LoadedTable::clone(&loaded))
    }

    /// Drops the cached parse of an upload. Returns whether one was cached.
    pub fn invalidate_table(&mut self, name: &str, bytes: &[u8]) -> bool {
        self.tables.remove(&upload_key(name, bytes)).is_some()
    }

    /// Returns the blacklist for `source`, fetching it on first use.
    ///
    /// A failed fetch is not cached.
    pub fn blacklist(
        &mut self,
        source: &dyn BlacklistSource,
        plan: &NumberingPlan,
    ) -> Result<Arc<Blacklist>, PhonesanError> {
        let key = source.identity();
        if let Some(cached) = self.blacklists.get(&key) {
            debug!("Serving blacklist from cache for source: {}", key);
            return Ok(Arc::clone(cached));
        }
        self.reload_blacklist(source, plan)
    }

    /// Fetches the blacklist again, replacing any cached copy on success.
    pub fn reload_blacklist(
        &mut self,
        source: &dyn BlacklistSource,
        plan: &NumberingPlan,
    ) -> Result<Arc<Blacklist>, PhonesanError> {
        let loaded = Arc::new(load_blacklist(source, plan)?);
        self.blacklists.insert(source.identity(), Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drops the cached blacklist of `source`. Returns whether one was cached.
    pub fn invalidate_blacklist(&mut self, source: &dyn BlacklistSource) -> bool {
        self.blacklists.remove(&source.identity()).is_some()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
        self.blacklists.clear();
    }

    pub fn cached_tables(&self) -> usize {
        self.tables.len()
    }

    pub fn cached_blacklists(&self) -> usize {
        self.blacklists.len()
    }
}
