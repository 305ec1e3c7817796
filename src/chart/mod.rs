/// Chart layer: scales, pie layout, tooltips, and SVG output.
///
/// Everything here is independent of the window; the egui renderers in
/// `ui::charts` and the SVG export share the same maths and tooltip text.

pub mod format;
pub mod hit;
pub mod pie;
pub mod scale;
pub mod svg;
pub mod tooltip;

/// The six record charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
    Bubble,
    Area,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::Bubble,
        ChartKind::Area,
        ChartKind::Scatter,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Bubble => "Bubble Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Scatter => "Scatter Plot",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Bubble => "bubble",
            ChartKind::Area => "area",
            ChartKind::Scatter => "scatter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_file_stems_are_distinct() {
        let mut stems: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_stem()).collect();
        stems.sort_unstable();
        stems.dedup();
        assert_eq!(stems.len(), ChartKind::ALL.len());
        assert!(ChartKind::ALL.contains(&ChartKind::Scatter));
    }
}
