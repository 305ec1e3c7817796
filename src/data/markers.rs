use super::model::Record;

/// Display position and flag for one country on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerInfo {
    /// `[latitude, longitude]` in degrees.
    pub coords: [f64; 2],
    /// ISO 3166-1 alpha-2 code, lowercase, as used by the flag CDN.
    pub flag_code: &'static str,
}

/// Countries that get a map marker, keyed by `Record::location`.
pub const MARKER_TABLE: [(&str, MarkerInfo); 10] = [
    ("United States", MarkerInfo { coords: [37.0902, -95.7129], flag_code: "us" }),
    ("China", MarkerInfo { coords: [35.8617, 104.1954], flag_code: "cn" }),
    ("India", MarkerInfo { coords: [20.5937, 78.9629], flag_code: "in" }),
    ("France", MarkerInfo { coords: [46.6034, 1.8883], flag_code: "fr" }),
    ("Germany", MarkerInfo { coords: [51.1657, 10.4515], flag_code: "de" }),
    ("Brazil", MarkerInfo { coords: [-14.235, -51.9253], flag_code: "br" }),
    ("South Korea", MarkerInfo { coords: [35.9078, 127.7669], flag_code: "kr" }),
    ("Japan", MarkerInfo { coords: [36.2048, 138.2529], flag_code: "jp" }),
    ("Italy", MarkerInfo { coords: [41.8719, 12.5674], flag_code: "it" }),
    ("United Kingdom", MarkerInfo { coords: [55.3781, -3.436], flag_code: "gb" }),
];

/// A record paired with its map placement.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub record: Record,
    pub info: MarkerInfo,
}

impl MapMarker {
    pub fn lat(&self) -> f64 {
        self.info.coords[0]
    }

    pub fn lon(&self) -> f64 {
        self.info.coords[1]
    }

    pub fn flag_url(&self) -> String {
        flag_url(self.info.flag_code)
    }
}

pub fn lookup(location: &str) -> Option<&'static MarkerInfo> {
    MARKER_TABLE
        .iter()
        .find(|(name, _)| *name == location)
        .map(|(_, info)| info)
}

/// Markers for every record whose location is in [`MARKER_TABLE`], in input
/// order. Unknown locations are skipped.
pub fn map_markers(records: &[Record]) -> Vec<MapMarker> {
    records
        .iter()
        .filter_map(|r| {
            lookup(&r.location).map(|info| MapMarker {
                record: r.clone(),
                info: *info,
            })
        })
        .collect()
}

/// 40px-wide PNG flag for an alpha-2 code.
pub fn flag_url(code: &str) -> String {
    format!("https://flagcdn.com/w40/{code}.png")
}
