// phonesan-core/src/blacklist.rs
//! Loading and querying the set of numbers excluded from the output.
//!
//! A blacklist is a headerless, single-column list of raw numbers. Each entry
//! is normalized with the same numbering plan as the table cells, so a
//! blacklist written with country codes still matches national numbers.
//! Sources sit behind the [`BlacklistSource`] trait: [`HttpSource`] for the
//! remotely maintained list and [`FileSource`] for a local copy.
//!
//! License: MIT OR APACHE 2.0

use csv::ReaderBuilder;
use log::{debug, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::NumberingPlan;
use crate::errors::PhonesanError;
use crate::normalizer::normalize_with;

/// Somewhere a raw blacklist can be fetched from.
pub trait BlacklistSource {
    /// Stable identifier of the source, used as the cache key.
    fn identity(&self) -> String;

    /// Fetches the raw list. Any failure maps to `BlacklistUnavailable`.
    fn fetch(&self) -> Result<Vec<u8>, PhonesanError>;
}

/// Fetches the list with a blocking HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::blocking::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl BlacklistSource for HttpSource {
    fn identity(&self) -> String {
        format!("http:{}", self.url)
    }

    fn fetch(&self) -> Result<Vec<u8>, PhonesanError> {
        info!("Fetching blacklist from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", "phonesan")
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| PhonesanError::BlacklistUnavailable(format!("request to {} failed: {}", self.url, e)))?;

        let body = response
            .bytes()
            .map_err(|e| PhonesanError::BlacklistUnavailable(format!("failed to read response body: {}", e)))?;
        debug!("Blacklist response: {} bytes", body.len());
        Ok(body.to_vec())
    }
}

/// Reads the list from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BlacklistSource for FileSource {
    fn identity(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<u8>, PhonesanError> {
        info!("Reading blacklist from {}", self.path.display());
        std::fs::read(&self.path).map_err(|e| {
            PhonesanError::BlacklistUnavailable(format!("cannot read {}: {}", self.path.display(), e))
        })
    }
}

/// A read-only set of normalized numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    numbers: HashSet<String>,
}

impl Blacklist {
    /// Builds a blacklist from raw entries, normalizing each one.
    pub fn from_entries<I, S>(entries: I, plan: &NumberingPlan) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let numbers = entries
            .into_iter()
            .map(|raw| normalize_with(raw.as_ref(), plan))
            .filter(|number| !number.is_empty())
            .collect();
        Self { numbers }
    }

    /// `number` must already be normalized.
    pub fn contains(&self, number: &str) -> bool {
        self.numbers.contains(number)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Fetches and parses a blacklist from `source`.
pub fn load_blacklist(source: &dyn BlacklistSource, plan: &NumberingPlan) -> Result<Blacklist, PhonesanError> {
    let raw = source.fetch()?;
    let blacklist = parse_blacklist(&raw, plan)?;
    info!("Loaded blacklist with {} unique numbers from {}", blacklist.len(), source.identity());
    Ok(blacklist)
}

/// Parses a headerless list, taking the first field of every record.
pub fn parse_blacklist(raw: &[u8], plan: &NumberingPlan) -> Result<Blacklist, PhonesanError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw);

    let mut entries = Vec::new();
    for record in reader.byte_records() {
        let record = record
            .map_err(|e| PhonesanError::BlacklistUnavailable(format!("malformed blacklist: {}", e)))?;
        if let Some(field) = record.get(0) {
            entries.push(String::from_utf8_lossy(field).into_owned());
        }
    }

    if entries.is_empty() {
        return Err(PhonesanError::BlacklistUnavailable(
            "malformed blacklist: the source contains no entries".to_string(),
        ));
    }

    debug!("Parsed {} raw blacklist entries", entries.len());
    Ok(Blacklist::from_entries(entries, plan))
}

/// Checks a raw or normalized number against the blacklist.
pub fn is_blacklisted(number: &str, blacklist: &Blacklist, plan: &NumberingPlan) -> bool {
    blacklist.contains(&normalize_with(number, plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_normalized_and_deduplicated() {
        let raw = b"5511912345678\n+55 (11) 91234-5678\n11912345678\n2134567890\n";
        let blacklist = parse_blacklist(raw, &NumberingPlan::default()).unwrap();
        assert_eq!(blacklist.len(), 2);
        assert!(blacklist.contains("11912345678"));
        assert!(blacklist.contains("2134567890"));
    }

    #[test]
    fn blank_entries_are_ignored() {
        let raw = b"11912345678\n\"\"\n n/a \n";
        let blacklist = parse_blacklist(raw, &NumberingPlan::default()).unwrap();
        assert_eq!(blacklist.len(), 1);
        assert!(!blacklist.contains(""));
    }

    #[test]
    fn only_first_field_is_used() {
        let raw = b"11912345678,2134567890\n";
        let blacklist = parse_blacklist(raw, &NumberingPlan::default()).unwrap();
        assert_eq!(blacklist.len(), 1);
        assert!(blacklist.contains("11912345678"));
    }

    #[test]
    fn empty_source_is_unavailable() {
        let err = parse_blacklist(b"", &NumberingPlan::default()).unwrap_err();
        assert!(matches!(err, PhonesanError::BlacklistUnavailable(_)));
    }

    #[test]
    fn is_blacklisted_normalizes_the_query() {
        let plan = NumberingPlan::default();
        let blacklist = Blacklist::from_entries(["11912345678"], &plan);
        assert!(is_blacklisted("+55 11 91234-5678", &blacklist, &plan));
        assert!(!is_blacklisted("11912345679", &blacklist, &plan));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let source = FileSource::new("/definitely/not/here.csv");
        let err = load_blacklist(&source, &NumberingPlan::default()).unwrap_err();
        assert!(matches!(err, PhonesanError::BlacklistUnavailable(_)));
    }
}
