use super::model::{RankedDataset, RawRow, Record};

/// Number of records the charts display.
pub const TOP_N: usize = 10;

/// Parse a required numeric cell: present, numeric, finite, non-zero.
fn required_number(row: &RawRow, column: &str) -> Option<f64> {
    let value: f64 = row.get(column)?.trim().parse().ok()?;
    (value.is_finite() && value != 0.0).then_some(value)
}

/// Turn a raw row into a [`Record`], or `None` if the row is not a
/// country-level row with usable case and population counts.
///
/// `total_deaths` is optional: empty, missing, or unparseable cells read as 0.
pub fn parse_record(row: &RawRow) -> Option<Record> {
    let iso_code = row.get("iso_code")?;
    if iso_code.chars().count() != 3 {
        return None;
    }
    let total_cases = required_number(row, "total_cases")?;
    let population = required_number(row, "population")?;
    let total_deaths = row
        .get("total_deaths")
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    Some(Record {
        iso_code: iso_code.clone(),
        location: row.get("location").cloned().unwrap_or_default(),
        total_cases,
        total_deaths,
        population,
    })
}

/// Sort descending by `total_cases`. The sort is stable, so equal counts
/// keep their input order.
pub fn rank(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|a, b| b.total_cases.total_cmp(&a.total_cases));
    records
}

/// Validate, rank and truncate to the default [`TOP_N`].
pub fn prepare(rows: &[RawRow]) -> RankedDataset {
    prepare_with_limit(rows, TOP_N)
}

/// Validate, rank and truncate to `limit` records.
pub fn prepare_with_limit(rows: &[RawRow], limit: usize) -> RankedDataset {
    let valid: Vec<Record> = rows.iter().filter_map(parse_record).collect();
    let dropped = rows.len() - valid.len();
    let all = rank(valid);
    let top = all.iter().take(limit).cloned().collect();

    log::debug!(
        "prepared {} valid rows ({} dropped), top {}",
        all.len(),
        dropped,
        limit
    );

    RankedDataset { top, all, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn country(iso: &str, location: &str, cases: &str) -> RawRow {
        row(&[
            ("iso_code", iso),
            ("location", location),
            ("total_cases", cases),
            ("population", "1000"),
        ])
    }

    #[test]
    fn drops_aggregate_codes_and_ranks_remaining() {
        let rows = vec![
            row(&[
                ("iso_code", "USA"),
                ("location", "United States"),
                ("total_cases", "100"),
                ("population", "1000"),
            ]),
            row(&[
                ("iso_code", "X"),
                ("location", "Bad"),
                ("total_cases", "999"),
                ("population", "1"),
            ]),
            row(&[
                ("iso_code", "FRA"),
                ("location", "France"),
                ("total_cases", "50"),
                ("population", "500"),
            ]),
        ];

        let ranked = prepare(&rows);
        let names: Vec<&str> = ranked.top.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(names, ["United States", "France"]);
        assert_eq!(ranked.top[0].total_cases, 100.0);
        assert_eq!(ranked.top[1].total_cases, 50.0);
        assert_eq!(ranked.dropped, 1);
    }

    #[test]
    fn zero_and_empty_required_fields_are_invalid() {
        let rows = vec![
            country("AAA", "Zero", "0"),
            country("BBB", "Empty", ""),
            country("CCC", "Decimal zero", "0.0"),
            row(&[("iso_code", "DDD"), ("location", "NoPop"), ("total_cases", "5")]),
            row(&[
                ("iso_code", "EEE"),
                ("location", "ZeroPop"),
                ("total_cases", "5"),
                ("population", "0"),
            ]),
        ];
        let ranked = prepare(&rows);
        assert!(ranked.is_empty());
        assert_eq!(ranked.dropped, 5);
    }

    #[test]
    fn non_numeric_and_non_finite_values_are_invalid() {
        let rows = vec![
            country("AAA", "Letters", "abc"),
            country("BBB", "Infinite", "inf"),
            country("CCC", "NaN", "NaN"),
            country("DDD", "Fine", " 42 "),
        ];
        let ranked = prepare(&rows);
        assert_eq!(ranked.all.len(), 1);
        assert_eq!(ranked.all[0].location, "Fine");
        assert_eq!(ranked.all[0].total_cases, 42.0);
    }

    #[test]
    fn iso_code_length_counts_characters() {
        let rows = vec![
            country("OWID_WRL", "World", "1000000"),
            country("EU", "Two letters", "10"),
            country("ÅLA", "Three chars", "10"),
        ];
        let ranked = prepare(&rows);
        assert_eq!(ranked.all.len(), 1);
        assert_eq!(ranked.all[0].iso_code, "ÅLA");
    }

    #[test]
    fn missing_or_blank_deaths_default_to_zero() {
        let mut with_blank = country("AAA", "Blank", "10");
        with_blank.insert("total_deaths".into(), String::new());
        let mut with_value = country("BBB", "Valued", "20");
        with_value.insert("total_deaths".into(), "7".into());
        let rows = vec![country("CCC", "Missing", "30"), with_blank, with_value];

        let ranked = prepare(&rows);
        let deaths: Vec<f64> = ranked.all.iter().map(|r| r.total_deaths).collect();
        assert_eq!(deaths, [0.0, 7.0, 0.0]);
        assert!(ranked.all.iter().all(|r| !r.total_deaths.is_nan()));
    }

    #[test]
    fn top_is_bounded_and_sorted_descending() {
        let rows: Vec<RawRow> = (1..=25)
            .map(|i| {
                let cases = ((i * 37) % 101 + 1).to_string();
                country(&format!("C{i:02}"), &format!("Country {i}"), &cases)
            })
            .collect();

        let ranked = prepare(&rows);
        assert_eq!(ranked.top.len(), TOP_N);
        assert_eq!(ranked.all.len(), 25);
        for pair in ranked.top.windows(2) {
            assert!(pair[0].total_cases >= pair[1].total_cases);
        }
        assert_eq!(ranked.top[..], ranked.all[..TOP_N]);
    }

    #[test]
    fn equal_counts_keep_input_order() {
        let rows = vec![
            country("AAA", "First", "10"),
            country("BBB", "Big", "99"),
            country("CCC", "Second", "10"),
            country("DDD", "Third", "10"),
        ];
        let ranked = prepare(&rows);
        let names: Vec<&str> = ranked.top.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(names, ["Big", "First", "Second", "Third"]);
    }

    #[test]
    fn preparing_twice_gives_identical_output() {
        let rows = vec![
            country("AAA", "A", "3"),
            country("B", "Bad", "3"),
            country("CCC", "C", "9"),
        ];
        assert_eq!(prepare(&rows), prepare(&rows));
    }

    #[test]
    fn custom_limit_truncates() {
        let rows = vec![
            country("AAA", "A", "3"),
            country("BBB", "B", "2"),
            country("CCC", "C", "1"),
        ];
        let ranked = prepare_with_limit(&rows, 2);
        assert_eq!(ranked.top.len(), 2);
        assert_eq!(ranked.all.len(), 3);
        assert!(prepare_with_limit(&rows, 0).top.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let ranked = prepare(&[]);
        assert_eq!(ranked, RankedDataset::default());
    }
}
