use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use csv::ReaderBuilder;
use thiserror::Error;

use crate::features::url_features;
use crate::types::Document;

pub const DEFAULT_CSV_FILE: &str = "crawled_urls.csv";

/// How many distinct source paths the table cache holds before evicting.
pub const TABLE_CACHE_CAPACITY: usize = 8;

const URL_COLUMN: &str = "url";
const COMPUTED_COLUMNS: [&str; 2] = ["domain", "path_depth"];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document file {} has no 'url' column", path.display())]
    MissingUrlColumn { path: PathBuf },
    #[error("failed to read document file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Default document file: `$DOCS_CSV` if set, else `<cwd>/data/crawled_urls.csv`.
pub fn default_csv_path() -> PathBuf {
    if let Ok(path) = std::env::var("DOCS_CSV") {
        return PathBuf::from(path);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join("data").join(DEFAULT_CSV_FILE))
        .unwrap_or_else(|_| Path::new("data").join(DEFAULT_CSV_FILE))
}

#[derive(Debug, Clone)]
pub struct DocumentRow {
    pub url: String,
    pub domain: String,
    pub path_depth: u32,
    /// Source columns other than `url` and the computed pair, passed
    /// through untouched.
    pub extra: BTreeMap<String, String>,
}

impl DocumentRow {
    pub fn to_document(&self) -> Document {
        Document {
            url: self.url.clone(),
            domain: self.domain.clone(),
            path_depth: self.path_depth,
        }
    }
}

/// Rows from one CSV file, in file order, with computed URL features.
#[derive(Debug, Clone)]
pub struct DocumentTable {
    pub columns: Vec<String>,
    pub rows: Vec<DocumentRow>,
}

impl DocumentTable {
    fn empty() -> Self {
        Self {
            columns: vec![
                URL_COLUMN.to_string(),
                "domain".to_string(),
                "path_depth".to_string(),
            ],
            rows: Vec::new(),
        }
    }

    /// First `limit` rows as documents; non-positive limits yield nothing.
    pub fn head(&self, limit: i64) -> Vec<Document> {
        if limit <= 0 {
            return Vec::new();
        }
        self.rows
            .iter()
            .take(limit as usize)
            .map(DocumentRow::to_document)
            .collect()
    }
}

fn read_table(path: &Path) -> Result<DocumentTable, StoreError> {
    // A missing file is a legitimately empty dataset, not an error.
    if !path.exists() {
        return Ok(DocumentTable::empty());
    }

    let read_err = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers = reader.headers().map_err(read_err)?.clone();
    let Some(url_idx) = headers.iter().position(|h| h == URL_COLUMN) else {
        return Err(StoreError::MissingUrlColumn {
            path: path.to_path_buf(),
        });
    };

    let mut columns: Vec<String> = headers.iter().map(str::to_string).collect();
    for computed in COMPUTED_COLUMNS {
        if !columns.iter().any(|c| c == computed) {
            columns.push(computed.to_string());
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        // Rows without a url are dropped, never surfaced as errors.
        let Some(url) = record.get(url_idx).filter(|u| !u.is_empty()) else {
            continue;
        };
        let (domain, path_depth) = url_features(url);
        let mut extra = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            if idx == url_idx {
                continue;
            }
            let Some(name) = headers.get(idx) else {
                continue;
            };
            // Computed columns shadow same-named source columns.
            if COMPUTED_COLUMNS.contains(&name) {
                continue;
            }
            extra.insert(name.to_string(), value.to_string());
        }
        rows.push(DocumentRow {
            url: url.to_string(),
            domain,
            path_depth,
            extra,
        });
    }

    Ok(DocumentTable { columns, rows })
}

struct CacheInner {
    tables: HashMap<PathBuf, Arc<DocumentTable>>,
    // most recently used at the front
    order: VecDeque<PathBuf>,
}

/// Parsed-table cache keyed by source path, capped at `capacity` entries.
///
/// Loading is idempotent, so two requests racing on a cold key at worst
/// parse the same file twice before the cache converges.
pub struct DocumentStore {
    capacity: usize,
    file_reads: AtomicUsize,
    inner: Mutex<CacheInner>,
}

impl DocumentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            file_reads: AtomicUsize::new(0),
            inner: Mutex::new(CacheInner {
                tables: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// How many times a backing file was actually read.
    pub fn file_reads(&self) -> usize {
        self.file_reads.load(Ordering::Relaxed)
    }

    pub fn load(&self, path: &Path) -> Result<Arc<DocumentTable>, StoreError> {
        if let Some(table) = self.cached(path) {
            return Ok(table);
        }
        // Parse outside the lock; see the race note above.
        self.file_reads.fetch_add(1, Ordering::Relaxed);
        let table = Arc::new(read_table(path)?);
        self.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    fn cached(&self, path: &Path) -> Option<Arc<DocumentTable>> {
        let mut inner = self.inner.lock().expect("table cache poisoned");
        let table = inner.tables.get(path).cloned()?;
        touch(&mut inner.order, path);
        Some(table)
    }

    fn insert(&self, path: PathBuf, table: Arc<DocumentTable>) {
        let mut inner = self.inner.lock().expect("table cache poisoned");
        inner.tables.insert(path.clone(), table);
        touch(&mut inner.order, &path);
        while inner.order.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_back() {
                inner.tables.remove(&evicted);
            }
        }
    }
}

fn touch(order: &mut VecDeque<PathBuf>, path: &Path) {
    if let Some(pos) = order.iter().position(|p| p == path) {
        order.remove(pos);
    }
    order.push_front(path.to_path_buf());
}
