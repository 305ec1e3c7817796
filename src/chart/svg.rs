use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::format::{thousands, xml_escape};
use super::pie::{pie_layout, wedge_path};
use super::scale::{BandScale, LinearScale, PointScale, SqrtScale};
use super::tooltip::{cases_tooltip, deaths_tooltip, TooltipContent};
use super::ChartKind;
use crate::color::{self, ColorMap};
use crate::data::model::Record;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
/// Inset used by the axis-less bubble and scatter plots.
const INSET: f64 = 50.0;
const PIE_SIZE: f64 = 500.0;
const PIE_RADIUS: f64 = 200.0;
const Y_TICKS: usize = 10;

#[derive(Debug, Clone, Copy)]
struct Margin {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

const MARGIN: Margin = Margin {
    top: 30.0,
    right: 30.0,
    bottom: 70.0,
    left: 60.0,
};

fn inner_size() -> (f64, f64) {
    (
        WIDTH - MARGIN.left - MARGIN.right,
        HEIGHT - MARGIN.top - MARGIN.bottom,
    )
}

fn max_of(records: &[Record], metric: impl Fn(&Record) -> f64) -> f64 {
    records.iter().map(metric).fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Document pieces
// ---------------------------------------------------------------------------

fn open_svg(width: f64, height: f64) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">
"##
    )
}

fn title_node(content: &TooltipContent) -> String {
    format!("<title>{}</title>", xml_escape(&content.plain_text()))
}

/// Category axis along the bottom edge, labels rotated -45°.
fn bottom_axis(labels: &[(f64, &str)], width: f64, height: f64) -> String {
    let mut out = format!(
        r##"<g class="x-axis" transform="translate(0,{height})" font-size="10">
<line x1="0" y1="0" x2="{width}" y2="0" stroke="currentColor"/>
"##
    );
    for (x, label) in labels {
        out.push_str(&format!(
            r##"<g transform="translate({x:.2},0)"><line y2="6" stroke="currentColor"/><text y="9" dy="0.71em" transform="rotate(-45)" text-anchor="end">{}</text></g>
"##,
            xml_escape(label)
        ));
    }
    out.push_str("</g>\n");
    out
}

/// Value axis along the left edge with thousands-grouped tick labels.
fn left_axis(y: &LinearScale) -> String {
    let [top, bottom] = [y.range[1], y.range[0]];
    let mut out = format!(
        r##"<g class="y-axis" font-size="10" text-anchor="end">
<line x1="0" y1="{top}" x2="0" y2="{bottom}" stroke="currentColor"/>
"##
    );
    for tick in y.ticks(Y_TICKS) {
        out.push_str(&format!(
            r##"<g transform="translate(0,{:.2})"><line x2="-6" stroke="currentColor"/><text x="-9" dy="0.32em">{}</text></g>
"##,
            y.apply(tick),
            thousands(tick)
        ));
    }
    out.push_str("</g>\n");
    out
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Vertical bars of total cases per location.
pub fn render_bar(records: &[Record]) -> String {
    let (w, h) = inner_size();
    let x = BandScale::new(records.len(), [0.0, w], 0.2);
    let y = LinearScale::new([0.0, max_of(records, |r| r.total_cases)], [h, 0.0]).nice(Y_TICKS);

    let mut svg = open_svg(WIDTH, HEIGHT);
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        MARGIN.left, MARGIN.top
    ));

    let mut labels = Vec::with_capacity(records.len());
    for (i, r) in records.iter().enumerate() {
        let Some(left) = x.position(i) else { continue };
        labels.push((left + x.bandwidth() / 2.0, r.location.as_str()));
    }
    svg.push_str(&bottom_axis(&labels, w, h));
    svg.push_str(&left_axis(&y));

    for (i, r) in records.iter().enumerate() {
        let Some(left) = x.position(i) else { continue };
        let top = y.apply(r.total_cases);
        svg.push_str(&format!(
            "<rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\">{}</rect>\n",
            x.bandwidth(),
            h - top,
            color::BAR_FILL,
            title_node(&cases_tooltip(r))
        ));
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Share of total cases per location, largest slice first from 12 o'clock.
pub fn render_pie(records: &[Record]) -> String {
    let values: Vec<f64> = records.iter().map(|r| r.total_cases).collect();
    let colors = ColorMap::new(records.iter().map(|r| r.location.as_str()));

    let mut svg = open_svg(PIE_SIZE, PIE_SIZE);
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        PIE_SIZE / 2.0,
        PIE_SIZE / 2.0
    ));
    for slice in pie_layout(&values) {
        let path = wedge_path(&slice, PIE_RADIUS);
        if path.is_empty() {
            continue;
        }
        let r = &records[slice.index];
        svg.push_str(&format!(
            "<path d=\"{path}\" fill=\"{}\">{}</path>\n",
            colors.hex_for(&r.location),
            title_node(&cases_tooltip(r))
        ));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn point_positions(records: &[Record], x: &PointScale, y: &LinearScale) -> Vec<(f64, f64)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| Some((x.position(i)?, y.apply(r.total_cases))))
        .collect()
}

fn point_labels<'a>(records: &'a [Record], x: &PointScale) -> Vec<(f64, &'a str)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| Some((x.position(i)?, r.location.as_str())))
        .collect()
}

/// Total cases joined by a line across locations, with hoverable dots.
pub fn render_line(records: &[Record]) -> String {
    let (w, h) = inner_size();
    let x = PointScale::new(records.len(), [0.0, w]);
    let y = LinearScale::new([0.0, max_of(records, |r| r.total_cases)], [h, 0.0]);
    let points = point_positions(records, &x, &y);

    let mut svg = open_svg(WIDTH, HEIGHT);
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        MARGIN.left, MARGIN.top
    ));
    svg.push_str(&bottom_axis(&point_labels(records, &x), w, h));
    svg.push_str(&left_axis(&y));

    if !points.is_empty() {
        let d: Vec<String> = points.iter().map(|(px, py)| format!("{px:.2},{py:.2}")).collect();
        svg.push_str(&format!(
            "<path d=\"M{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            d.join("L"),
            color::LINE_STROKE
        ));
    }
    for (r, (px, py)) in records.iter().zip(&points) {
        svg.push_str(&format!(
            "<circle cx=\"{px:.2}\" cy=\"{py:.2}\" r=\"4\" fill=\"{}\">{}</circle>\n",
            color::LINE_POINT,
            title_node(&cases_tooltip(r))
        ));
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Population against cases, bubble area tracking cases.
pub fn render_bubble(records: &[Record]) -> String {
    let max_cases = max_of(records, |r| r.total_cases);
    let x = LinearScale::new(
        [0.0, max_of(records, |r| r.population)],
        [INSET, WIDTH - INSET],
    );
    let y = LinearScale::new([0.0, max_cases], [HEIGHT - INSET, INSET]);
    let radius = SqrtScale::new([0.0, max_cases], [5.0, 40.0]);

    let mut svg = open_svg(WIDTH, HEIGHT);
    for r in records {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" opacity=\"0.7\">{}</circle>\n",
            x.apply(r.population),
            y.apply(r.total_cases),
            radius.apply(r.total_cases),
            color::BUBBLE_FILL,
            title_node(&cases_tooltip(r))
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Filled area under the total-cases line.
pub fn render_area(records: &[Record]) -> String {
    let (w, h) = inner_size();
    let x = PointScale::new(records.len(), [0.0, w]);
    let y = LinearScale::new([0.0, max_of(records, |r| r.total_cases)], [h, 0.0]);
    let points = point_positions(records, &x, &y);

    let mut svg = open_svg(WIDTH, HEIGHT);
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        MARGIN.left, MARGIN.top
    ));

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let mut d = format!("M{:.2},{h:.2}", first.0);
        for (px, py) in &points {
            d.push_str(&format!("L{px:.2},{py:.2}"));
        }
        d.push_str(&format!("L{:.2},{h:.2}Z", last.0));
        svg.push_str(&format!("<path d=\"{d}\" fill=\"{}\"/>\n", color::AREA_FILL));
    }

    svg.push_str(&bottom_axis(&point_labels(records, &x), w, h));
    svg.push_str(&left_axis(&y));
    svg.push_str("</g>\n</svg>\n");
    svg
}

/// Population against deaths.
pub fn render_scatter(records: &[Record]) -> String {
    let x = LinearScale::new(
        [0.0, max_of(records, |r| r.population)],
        [INSET, WIDTH - INSET],
    );
    let y = LinearScale::new(
        [0.0, max_of(records, |r| r.total_deaths)],
        [HEIGHT - INSET, INSET],
    );

    let mut svg = open_svg(WIDTH, HEIGHT);
    for r in records {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"5\" fill=\"{}\">{}</circle>\n",
            x.apply(r.population),
            y.apply(r.total_deaths),
            color::SCATTER_FILL,
            title_node(&deaths_tooltip(r))
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

pub fn render(kind: ChartKind, records: &[Record]) -> String {
    match kind {
        ChartKind::Bar => render_bar(records),
        ChartKind::Pie => render_pie(records),
        ChartKind::Line => render_line(records),
        ChartKind::Bubble => render_bubble(records),
        ChartKind::Area => render_area(records),
        ChartKind::Scatter => render_scatter(records),
    }
}

/// Write one `<kind>.svg` per chart into `dir`, creating it if needed.
pub fn export_all(records: &[Record], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let path = dir.join(format!("{}.svg", kind.file_stem()));
        std::fs::write(&path, render(kind, records))
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(iso: &str, location: &str, cases: f64, deaths: f64, population: f64) -> Record {
        Record {
            iso_code: iso.into(),
            location: location.into(),
            total_cases: cases,
            total_deaths: deaths,
            population,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("USA", "United States", 100.0, 10.0, 1000.0),
            record("FRA", "France", 50.0, 0.0, 500.0),
            record("BIH", "Bosnia & Herzegovina", 25.0, 2.0, 300.0),
        ]
    }

    #[test]
    fn bar_chart_has_one_rect_per_record() {
        let svg = render_bar(&sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains(color::BAR_FILL));
        assert!(svg.contains("<title>United States\nTotal Cases: 100</title>"));
    }

    #[test]
    fn labels_are_escaped() {
        let svg = render_bar(&sample());
        assert!(svg.contains("Bosnia &amp; Herzegovina"));
        assert!(!svg.contains("Bosnia & Herzegovina"));
    }

    #[test]
    fn tallest_bar_reaches_nice_domain_top() {
        // max 100 is already nice, so the first bar starts at y = 0
        let svg = render_bar(&sample());
        assert!(svg.contains("y=\"0.00\""));
        assert!(svg.contains("height=\"400.00\""));
    }

    #[test]
    fn pie_has_one_wedge_per_positive_value() {
        let mut records = sample();
        records.push(record("ZZZ", "Nowhere", 0.0, 0.0, 1.0));
        let svg = render_pie(&records);
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains(crate::color::CATEGORY10[0]));
    }

    #[test]
    fn line_has_path_and_dots() {
        let svg = render_line(&sample());
        assert_eq!(svg.matches("<path").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("M0.00,0.00L355.00,200.00L710.00,300.00"));
    }

    #[test]
    fn area_is_closed_on_baseline() {
        let svg = render_area(&sample());
        assert!(svg.contains("M0.00,400.00L0.00,0.00"));
        assert!(svg.contains("L710.00,400.00Z"));
    }

    #[test]
    fn scatter_uses_deaths_tooltip() {
        let svg = render_scatter(&sample());
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("France\nDeaths: 0"));
    }

    #[test]
    fn bubble_radius_grows_with_cases() {
        let svg = render_bubble(&sample());
        assert!(svg.contains("r=\"40.00\""));
        assert_eq!(svg.matches("opacity=\"0.7\"").count(), 3);
    }

    #[test]
    fn empty_input_still_renders_documents() {
        for kind in ChartKind::ALL {
            let svg = render(kind, &[]);
            assert!(svg.starts_with("<svg"), "{kind:?}");
            assert!(!svg.contains("NaN"), "{kind:?}");
        }
    }

    #[test]
    fn export_writes_six_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let written = export_all(&sample(), &out).unwrap();
        assert_eq!(written.len(), 6);
        for path in &written {
            let text = std::fs::read_to_string(path).unwrap();
            assert!(text.starts_with("<svg"));
        }
        assert!(out.join("scatter.svg").exists());
    }
}
