/// Data layer: raw rows, loading, preparation, and map annotation.
///
/// Architecture:
/// ```text
///  URL / .csv file
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  CSV → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ prepare  │  validate → rank → truncate → RankedDataset
///   └──────────┘
///        │                     │
///        ▼                     ▼
///   top (charts)      all ──► markers (map)
/// ```

pub mod error;
pub mod loader;
pub mod markers;
pub mod model;
pub mod prepare;
