use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// RawRow – one untyped CSV row
// ---------------------------------------------------------------------------

/// One CSV row as delivered by the loader: column_name → raw string value.
/// Columns missing from a short row are simply absent.
pub type RawRow = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Record – one validated country row
// ---------------------------------------------------------------------------

/// Country-level statistics for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// ISO 3166-1 alpha-3 code; always exactly 3 characters.
    pub iso_code: String,
    /// Display name, e.g. "United States".
    pub location: String,
    /// Cumulative confirmed cases; finite and non-zero.
    pub total_cases: f64,
    /// Cumulative deaths; 0 when the source left the cell empty.
    pub total_deaths: f64,
    /// Population; finite and non-zero.
    pub population: f64,
}

// ---------------------------------------------------------------------------
// RankedDataset – output of the preparation pipeline
// ---------------------------------------------------------------------------

/// Result of one preparation pass. Built once per fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedDataset {
    /// Highest-ranked records by `total_cases`, descending.
    pub top: Vec<Record>,
    /// Every valid record in ranked order (map annotation uses this).
    pub all: Vec<Record>,
    /// Number of input rows rejected by validation.
    pub dropped: usize,
}

impl RankedDataset {
    /// Number of valid records.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Whether no row survived validation.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
