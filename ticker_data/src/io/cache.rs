//! On-disk snapshot cache: one JSON document per ticker.

use std::{
    fs,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    errors::Error,
    models::{snapshot::Snapshot, ticker::Ticker},
};

/// Snapshot files under a single data directory, named `<TICKER>.json`.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    data_dir: PathBuf,
}

impl SnapshotCache {
    /// The directory is created lazily on the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Cache file path for a ticker.
    pub fn path(&self, ticker: &Ticker) -> PathBuf {
        self.data_dir.join(format!("{ticker}.json"))
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.path(ticker).is_file()
    }

    /// Replaces the cache file for `ticker` with `snapshot`.
    ///
    /// The document is written to a temporary file in the data directory and
    /// renamed over the target, so readers never see a half-written file.
    pub fn write(&self, ticker: &Ticker, snapshot: &Snapshot) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.data_dir)?;

        let path = self.path(ticker);
        let tmp = NamedTempFile::new_in(&self.data_dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, snapshot)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| Error::Io(e.error))?;

        info!("Cached {ticker} at {}", path.display());
        Ok(path)
    }

    /// Reads the cached snapshot for `ticker`.
    ///
    /// Returns [`Error::CacheMiss`] when there is no cache file.
    pub fn read(&self, ticker: &Ticker) -> Result<Snapshot, Error> {
        let path = self.path(ticker);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::CacheMiss {
                    ticker: ticker.to_string(),
                    path,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {ticker} from {}", path.display());
        Ok(snapshot)
    }

    /// Tickers with a cache file, sorted. Files whose name is not a valid
    /// ticker are ignored; a missing data directory means an empty cache.
    pub fn list(&self) -> Result<Vec<Ticker>, Error> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut tickers = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Only exact, already-normalized names count as cache entries.
            if let Ok(ticker) = Ticker::new(stem)
                && ticker.as_str() == stem
            {
                tickers.push(ticker);
            }
        }
        tickers.sort();
        Ok(tickers)
    }
}
