use std::path::PathBuf;

use anyhow::{Context, Result};

const HEADER: [&str; 6] = [
    "iso_code",
    "continent",
    "location",
    "total_cases",
    "total_deaths",
    "population",
];

/// (iso_code, continent, location, population)
const COUNTRIES: [(&str, &str, &str, f64); 16] = [
    ("USA", "North America", "United States", 338_289_857.0),
    ("IND", "Asia", "India", 1_417_173_173.0),
    ("FRA", "Europe", "France", 67_813_000.0),
    ("DEU", "Europe", "Germany", 83_369_840.0),
    ("BRA", "South America", "Brazil", 215_313_504.0),
    ("JPN", "Asia", "Japan", 123_951_696.0),
    ("KOR", "Asia", "South Korea", 51_815_808.0),
    ("ITA", "Europe", "Italy", 59_037_472.0),
    ("GBR", "Europe", "United Kingdom", 67_508_936.0),
    ("RUS", "Europe", "Russia", 144_713_312.0),
    ("TUR", "Asia", "Turkey", 85_341_248.0),
    ("ESP", "Europe", "Spain", 47_558_632.0),
    ("AUS", "Oceania", "Australia", 26_177_410.0),
    ("ARG", "South America", "Argentina", 45_510_324.0),
    ("NLD", "Europe", "Netherlands", 17_564_020.0),
    ("MEX", "North America", "Mexico", 127_504_120.0),
];

/// Aggregate rows the dashboard must skip (iso code is not 3 characters).
const AGGREGATES: [(&str, &str, f64); 3] = [
    ("OWID_WRL", "World", 7_975_105_024.0),
    ("OWID_EUR", "Europe", 744_807_803.0),
    ("OWID_ASI", "Asia", 4_721_383_370.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Cumulative cases and deaths for a population: 5–35 % attack rate,
/// 0.1–1.5 % case fatality.
fn outbreak(rng: &mut SimpleRng, population: f64) -> (f64, f64) {
    let cases = (population * rng.uniform(0.05, 0.35)).round();
    let deaths = (cases * rng.uniform(0.001, 0.015)).round();
    (cases, deaths)
}

fn sample_rows(seed: u64) -> Vec<[String; 6]> {
    let mut rng = SimpleRng::new(seed);
    let mut rows = Vec::new();

    for &(iso, continent, location, population) in &COUNTRIES {
        let (cases, deaths) = outbreak(&mut rng, population);
        rows.push([
            iso.to_string(),
            continent.to_string(),
            location.to_string(),
            format!("{cases:.1}"),
            format!("{deaths:.1}"),
            format!("{population:.1}"),
        ]);
    }

    for &(iso, location, population) in &AGGREGATES {
        let (cases, deaths) = outbreak(&mut rng, population);
        rows.push([
            iso.to_string(),
            String::new(),
            location.to_string(),
            format!("{cases:.1}"),
            format!("{deaths:.1}"),
            format!("{population:.1}"),
        ]);
    }

    // Rows that fail validation: no cases, zero cases, garbage population.
    let junk = [
        ["VAT", "Europe", "Vatican", "", "", "808.0"],
        ["PRK", "Asia", "North Korea", "0.0", "", "26069416.0"],
        ["ATA", "", "Antarctica", "11.0", "0.0", "abc"],
    ];
    rows.extend(junk.map(|row| row.map(str::to_string)));

    rows
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data.csv"));

    let rows = sample_rows(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!("Wrote {} rows to {}", rows.len(), output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rows() {
        assert_eq!(sample_rows(7), sample_rows(7));
        assert_ne!(sample_rows(7), sample_rows(8));
    }

    #[test]
    fn includes_aggregates_and_junk() {
        let rows = sample_rows(42);
        assert_eq!(rows.len(), COUNTRIES.len() + AGGREGATES.len() + 3);
        assert!(rows.iter().any(|r| r[0] == "OWID_WRL"));
        assert!(rows.iter().any(|r| r[5] == "abc"));
    }

    #[test]
    fn country_counts_stay_within_population() {
        for row in sample_rows(42).iter().take(COUNTRIES.len()) {
            let cases: f64 = row[3].parse().unwrap();
            let deaths: f64 = row[4].parse().unwrap();
            let population: f64 = row[5].parse().unwrap();
            assert!(cases > 0.0 && cases < population);
            assert!(deaths < cases);
        }
    }
}
