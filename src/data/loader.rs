use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::LoadError;
use super::model::RawRow;

/// Latest-snapshot CSV published by Our World in Data.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/owid/covid-19-data/master/public/data/latest/owid-covid-latest.csv";

/// Columns the preparer reads. Extra columns are carried along untouched.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "iso_code",
    "location",
    "total_cases",
    "total_deaths",
    "population",
];

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the raw dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Load raw rows from this source. Blocks on network or disk I/O.
    pub fn load(&self) -> Result<Vec<RawRow>, LoadError> {
        match self {
            DataSource::Url(url) => fetch_url(url),
            DataSource::File(path) => load_file(path),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV text into untyped rows keyed by header name.
///
/// Short rows are accepted; their trailing columns are absent from the map.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|col| !headers.iter().any(|h| h.as_str() == *col))
    {
        return Err(LoadError::MissingColumn(missing));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Load a CSV file from disk.
pub fn load_file(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_csv(std::io::BufReader::new(file))?;
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Download and parse the CSV at `url`. No retries.
pub fn fetch_url(url: &str) -> Result<Vec<RawRow>, LoadError> {
    let http_err = |source: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(http_err)?;
    let response = client.get(url).send().map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(http_err)?;
    let rows = parse_csv(&body[..])?;
    log::info!("Fetched {} rows from {url}", rows.len());
    Ok(rows)
}
