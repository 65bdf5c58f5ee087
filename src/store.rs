//! Loaded catalog collections.
//!
//! The store is filled once at startup from one dataset per category and is
//! read-only afterwards. Every source is fetched concurrently; the store is
//! only built once all of them succeeded, and the first failure aborts the
//! whole load.

use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::model::types::{Category, Record};

/// Timeout for each HTTP dataset request.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Where the datasets live: a local directory or an HTTP(S) base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataRoot {
    Dir(PathBuf),
    BaseUrl(String),
}

impl DataRoot {
    /// `http://` and `https://` prefixes select a base URL, anything else
    /// is a directory.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::BaseUrl(trimmed.trim_end_matches('/').to_string())
        } else {
            Self::Dir(PathBuf::from(trimmed))
        }
    }

    /// Location of the dataset for `category` under this root.
    pub fn locate(&self, category: Category) -> SourceLocation {
        let relative = category.dataset_path();
        match self {
            Self::Dir(dir) => SourceLocation::Path(dir.join(relative)),
            Self::BaseUrl(base) => {
                let segments: Vec<String> = relative
                    .iter()
                    .map(|s| urlencoding::encode(&s.to_string_lossy()).into_owned())
                    .collect();
                SourceLocation::Url(format!("{base}/{}", segments.join("/")))
            }
        }
    }
}

impl std::fmt::Display for DataRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dir(dir) => write!(f, "{}", dir.display()),
            Self::BaseUrl(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// One dataset to load: which category it fills and where to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub category: Category,
    pub location: SourceLocation,
}

impl SourceDescriptor {
    pub fn new(category: Category, location: SourceLocation) -> Self {
        Self { category, location }
    }

    /// One descriptor per known category, resolved against `root`.
    pub fn defaults(root: &DataRoot) -> Vec<Self> {
        Category::all()
            .map(|category| Self::new(category, root.locate(category)))
            .collect()
    }
}

/// A dataset source could not be retrieved or parsed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {category} data from {location}: {source}")]
    Read {
        category: Category,
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {category} data at {location} failed: {source}")]
    Request {
        category: Category,
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{category} data at {location} answered with HTTP {status}")]
    Status {
        category: Category,
        location: String,
        status: u16,
    },

    #[error("failed to parse {category} data from {location}: {source}")]
    Parse {
        category: Category,
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{category} load task did not complete: {source}")]
    Join {
        category: Category,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl LoadError {
    /// Category whose source failed.
    pub fn category(&self) -> Category {
        match self {
            Self::Read { category, .. }
            | Self::Request { category, .. }
            | Self::Status { category, .. }
            | Self::Parse { category, .. }
            | Self::Join { category, .. } => *category,
        }
    }
}

/// Read-only record collections keyed by category.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    collections: HashMap<Category, Vec<Record>>,
}

impl RecordStore {
    /// Build a store from already-parsed collections.
    pub fn from_collections(collections: HashMap<Category, Vec<Record>>) -> Self {
        Self { collections }
    }

    /// Fetch and parse every source concurrently, then build the store.
    pub async fn load(sources: &[SourceDescriptor]) -> Result<Self, LoadError> {
        let client = match sources.iter().find(|s| s.location.is_remote()) {
            Some(first_remote) => Some(build_client(first_remote)?),
            None => None,
        };

        let mut pending: VecDeque<(Category, JoinHandle<Result<Vec<Record>, LoadError>>)> = sources
            .iter()
            .cloned()
            .map(|source| {
                let category = source.category;
                let handle = tokio::spawn(fetch_source(client.clone(), source));
                (category, handle)
            })
            .collect();

        let mut collections = HashMap::with_capacity(pending.len());
        // Barrier: every task must succeed before the store exists.
        while let Some((category, handle)) = pending.pop_front() {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(source) => Err(LoadError::Join { category, source }),
            };
            match outcome {
                Ok(records) => {
                    if collections.insert(category, records).is_some() {
                        warn!(category = category.key(), "duplicate source replaced earlier data");
                    }
                }
                Err(err) => {
                    for (_, rest) in &pending {
                        rest.abort();
                    }
                    warn!(category = err.category().key(), error = %err, "catalog load aborted");
                    return Err(err);
                }
            }
        }

        let store = Self { collections };
        info!(
            sources = sources.len(),
            records = store.len(),
            "catalog loaded"
        );
        Ok(store)
    }

    /// Load every known category from `root`.
    pub async fn load_from_root(root: &DataRoot) -> Result<Self, LoadError> {
        Self::load(&SourceDescriptor::defaults(root)).await
    }

    /// Records of `category`; empty when it was never loaded.
    pub fn get_by_category(&self, category: Category) -> &[Record] {
        self.collections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Loaded categories, in canonical order.
    pub fn categories(&self) -> Vec<Category> {
        Category::all()
            .filter(|c| self.collections.contains_key(c))
            .collect()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn build_client(source: &SourceDescriptor) -> Result<Client, LoadError> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(concat!("catalog-search/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LoadError::Request {
            category: source.category,
            location: source.location.to_string(),
            source: e,
        })
}

async fn fetch_source(
    client: Option<Client>,
    source: SourceDescriptor,
) -> Result<Vec<Record>, LoadError> {
    let category = source.category;
    let location = source.location.to_string();
    debug!(category = category.key(), location = %location, "fetching dataset");

    let bytes = match &source.location {
        SourceLocation::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::Read {
                    category,
                    location: location.clone(),
                    source: e,
                })?
        }
        SourceLocation::Url(url) => {
            let client = match client {
                Some(client) => client,
                None => build_client(&source)?,
            };
            let request_err = |e| LoadError::Request {
                category,
                location: location.clone(),
                source: e,
            };
            let response = client.get(url).send().await.map_err(request_err)?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    category,
                    location: location.clone(),
                    status: status.as_u16(),
                });
            }
            response.bytes().await.map_err(request_err)?.to_vec()
        }
    };

    let objects: Vec<Map<String, Value>> =
        serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse {
            category,
            location: location.clone(),
            source: e,
        })?;
    let records: Vec<Record> = objects
        .into_iter()
        .map(|object| Record::from_json(category, object))
        .collect();

    info!(
        category = category.key(),
        location = %location,
        records = records.len(),
        "dataset loaded"
    );
    Ok(records)
}
