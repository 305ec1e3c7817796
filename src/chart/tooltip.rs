use crate::chart::format::thousands;
use crate::data::markers::MapMarker;
use crate::data::model::Record;

/// What a hover tooltip or marker popup shows: a bold title,
/// `label: value` lines and an optional image (by URL).
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<(String, String)>,
    pub image_url: Option<String>,
}

impl TooltipContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn line(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push((label.into(), value.into()));
        self
    }

    /// Single-string form, one line per entry.
    pub fn plain_text(&self) -> String {
        let mut text = self.title.clone();
        for (label, value) in &self.lines {
            text.push('\n');
            text.push_str(label);
            text.push_str(": ");
            text.push_str(value);
        }
        text
    }
}

/// Capability handed to each interactive chart renderer.
/// `at` is a screen position in points.
pub trait Tooltip {
    fn show(&mut self, content: &TooltipContent, at: [f32; 2]);
    fn hide(&mut self);
}

pub fn cases_tooltip(record: &Record) -> TooltipContent {
    TooltipContent::new(&record.location).line("Total Cases", thousands(record.total_cases))
}

pub fn deaths_tooltip(record: &Record) -> TooltipContent {
    TooltipContent::new(&record.location).line("Deaths", thousands(record.total_deaths))
}

/// Map marker popup, headed by the country's flag.
pub fn popup(marker: &MapMarker) -> TooltipContent {
    let record = &marker.record;
    TooltipContent::new(&record.location)
        .line("Cases", thousands(record.total_cases))
        .line("Deaths", thousands(record.total_deaths))
        .line("Population", thousands(record.population))
        .with_image(marker.flag_url())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call so renderer logic can be checked without a UI.
    #[derive(Default)]
    pub(crate) struct RecordingTooltip {
        pub shown: Option<(TooltipContent, [f32; 2])>,
        pub hides: usize,
    }

    impl Tooltip for RecordingTooltip {
        fn show(&mut self, content: &TooltipContent, at: [f32; 2]) {
            self.shown = Some((content.clone(), at));
        }

        fn hide(&mut self) {
            self.shown = None;
            self.hides += 1;
        }
    }

    fn record() -> Record {
        Record {
            iso_code: "USA".into(),
            location: "United States".into(),
            total_cases: 103_436_829.0,
            total_deaths: 0.0,
            population: 338_289_856.0,
        }
    }

    #[test]
    fn cases_tooltip_formats_count() {
        let content = cases_tooltip(&record());
        assert_eq!(content.plain_text(), "United States\nTotal Cases: 103,436,829");
    }

    #[test]
    fn deaths_default_renders_as_zero() {
        let content = deaths_tooltip(&record());
        assert_eq!(content.lines, vec![("Deaths".to_string(), "0".to_string())]);
    }

    fn marker() -> MapMarker {
        crate::data::markers::map_markers(&[record()]).remove(0)
    }

    #[test]
    fn popup_lists_all_counts() {
        let labels: Vec<String> = popup(&marker()).lines.into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["Cases", "Deaths", "Population"]);
    }

    #[test]
    fn popup_carries_flag_image() {
        let content = popup(&marker());
        assert_eq!(
            content.image_url.as_deref(),
            Some("https://flagcdn.com/w40/us.png")
        );
        assert!(cases_tooltip(&record()).image_url.is_none());
    }

    #[test]
    fn recording_tooltip_tracks_state() {
        let mut tip = RecordingTooltip::default();
        tip.show(&cases_tooltip(&record()), [10.0, 20.0]);
        assert_eq!(tip.shown.as_ref().map(|(_, at)| *at), Some([10.0, 20.0]));
        tip.hide();
        assert!(tip.shown.is_none());
        assert_eq!(tip.hides, 1);
    }
}
