//! Public suffix table and registrable-domain extraction.
//!
//! The table is a plain set of suffix strings loaded once (from the
//! `public_suffix_list.dat` format, or a JSON snapshot with `with-serde`) and
//! never mutated afterwards, so a single instance can be shared behind an
//! `Arc` by concurrent discoveries.

mod error;

pub use error::SuffixError;

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::http::HttpTransport;

/// Official location of the Mozilla public suffix list.
pub const PUBLIC_SUFFIX_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixTable {
    entries: HashSet<String>,
}

impl SuffixTable {
    /// Parses newline-separated suffix entries. Blank lines and `//` comments
    /// are skipped; an entry ends at the first whitespace.
    pub fn load<R: Read>(source: R) -> Result<Self, SuffixError> {
        let reader = BufReader::new(source);
        let mut entries = HashSet::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| SuffixError::load(index + 1, source))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            if let Some(entry) = trimmed.split_whitespace().next() {
                entries.insert(entry.to_ascii_lowercase());
            }
        }
        if entries.is_empty() {
            return Err(SuffixError::EmptyList);
        }
        Ok(Self { entries })
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| normalize_host(entry.as_ref()))
                .filter(|entry| !entry.is_empty())
                .collect(),
        }
    }

    /// Loads a table from disk. Paths ending in `.json` are read as a JSON
    /// snapshot (requires `with-serde`), anything else as the `.dat` format.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SuffixError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SuffixError::open(path, source))?;

        #[cfg(feature = "with-serde")]
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            return Self::from_json_reader(file);
        }

        Self::load(file)
    }

    /// Downloads and parses a suffix list through `http`.
    pub fn fetch<H: HttpTransport>(http: &H, url: &str) -> Result<Self, SuffixError> {
        let response = http
            .get(url)
            .map_err(|source| SuffixError::transport(url, source))?;
        if response.status != 200 {
            return Err(SuffixError::Download {
                url: url.to_string(),
                status: response.status,
            });
        }
        let table = Self::load(response.body.as_slice())?;
        debug!(url, entries = table.len(), "public suffix list downloaded");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, suffix: &str) -> bool {
        self.entries.contains(&normalize_host(suffix))
    }

    /// Returns the registrable domain of `hostname`. Labels are walked left to
    /// right and the first joined tail present in the table is the public
    /// suffix; the label just before it is prepended. Wildcard and exception
    /// rules are stored verbatim and never match.
    pub fn extract_sld(&self, hostname: &str) -> Result<String, SuffixError> {
        let host = normalize_host(hostname);
        let labels: Vec<&str> = host.split('.').collect();

        for i in 0..labels.len() {
            let candidate = labels[i..].join(".");
            if self.entries.contains(&candidate) {
                if i == 0 {
                    return Err(SuffixError::NoRegistrableDomain { hostname: host });
                }
                return Ok(format!("{}.{}", labels[i - 1], candidate));
            }
        }

        Err(SuffixError::NoPublicSuffixFound { hostname: host })
    }

    /// Writes the table back in `.dat` form, one sorted entry per line.
    pub fn write_list<W: Write>(&self, mut out: W) -> Result<(), SuffixError> {
        for entry in self.sorted() {
            writeln!(out, "{entry}").map_err(SuffixError::write)?;
        }
        out.flush().map_err(SuffixError::write)
    }

    fn sorted(&self) -> BTreeSet<&str> {
        self.entries.iter().map(String::as_str).collect()
    }
}

#[cfg(feature = "with-serde")]
impl SuffixTable {
    /// Reads a `{"suffix": true, ...}` snapshot. Entries mapped to `false`
    /// are ignored.
    pub fn from_json_reader<R: Read>(source: R) -> Result<Self, SuffixError> {
        let map: std::collections::BTreeMap<String, bool> =
            serde_json::from_reader(BufReader::new(source)).map_err(SuffixError::json)?;
        let table = Self::from_entries(
            map.into_iter()
                .filter(|(_, present)| *present)
                .map(|(entry, _)| entry),
        );
        if table.is_empty() {
            return Err(SuffixError::EmptyList);
        }
        Ok(table)
    }

    pub fn write_json<W: Write>(&self, out: W) -> Result<(), SuffixError> {
        let map: std::collections::BTreeMap<&str, bool> =
            self.sorted().into_iter().map(|entry| (entry, true)).collect();
        serde_json::to_writer(out, &map).map_err(SuffixError::json)
    }
}

pub(crate) fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests;
