use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::chart::format::thousands;
use crate::chart::ChartKind;
use crate::config::DashboardConfig;
use crate::data::error::LoadError;
use crate::data::loader::DataSource;
use crate::data::markers::{map_markers, MapMarker};
use crate::data::model::{RankedDataset, RawRow};
use crate::data::prepare::prepare_with_limit;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chart(ChartKind),
    Map,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Chart(ChartKind::Bar),
        Tab::Chart(ChartKind::Pie),
        Tab::Chart(ChartKind::Line),
        Tab::Chart(ChartKind::Bubble),
        Tab::Chart(ChartKind::Area),
        Tab::Chart(ChartKind::Scatter),
        Tab::Map,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Chart(kind) => kind.title(),
            Tab::Map => "Map",
        }
    }
}

// ---------------------------------------------------------------------------
// Map view lifecycle
// ---------------------------------------------------------------------------

/// The map's per-dataset state. Created the first time the Map tab is
/// shown, invalidated every time it is shown again, dropped when the
/// dataset changes or the dashboard closes.
#[derive(Debug)]
pub struct MapView {
    markers: Vec<MapMarker>,
    needs_reset: bool,
    /// Marker under the pointer during the last frame.
    pub hovered: Option<usize>,
}

impl MapView {
    fn new(markers: Vec<MapMarker>) -> Self {
        log::debug!("map view created with {} markers", markers.len());
        Self {
            markers,
            needs_reset: true,
            hovered: None,
        }
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Ask the next frame to recompute the view bounds.
    pub fn invalidate(&mut self) {
        self.needs_reset = true;
    }

    /// Consume a pending invalidation.
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.needs_reset)
    }
}

// ---------------------------------------------------------------------------
// Background fetch
// ---------------------------------------------------------------------------

pub type FetchResult = Result<Vec<RawRow>, LoadError>;

struct FetchJob {
    source: DataSource,
    rx: Receiver<FetchResult>,
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct DashboardState {
    pub config: DashboardConfig,

    /// Prepared dataset (None until the first load succeeds).
    pub dataset: Option<RankedDataset>,

    /// Tab currently shown in the central panel.
    active_tab: Tab,

    map: Option<MapView>,

    fetch: Option<FetchJob>,

    /// Pie slice picked by the last click.
    pub selected_slice: Option<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            active_tab: Tab::Chart(ChartKind::Bar),
            map: None,
            fetch: None,
            selected_slice: None,
            status_message: None,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn map(&self) -> Option<&MapView> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut MapView> {
        self.map.as_mut()
    }

    /// Switch tabs. Showing the Map tab is the map's visibility signal:
    /// it builds the view on first show and invalidates it afterwards.
    pub fn activate(&mut self, tab: Tab) {
        self.active_tab = tab;
        if tab == Tab::Map {
            self.show_map();
        }
    }

    fn show_map(&mut self) {
        if let Some(map) = &mut self.map {
            map.invalidate();
        } else if let Some(dataset) = &self.dataset {
            self.map = Some(MapView::new(map_markers(&dataset.all)));
        }
    }

    /// Replace the dataset. The old map view no longer matches and is
    /// torn down; it is rebuilt straight away if the map is on screen.
    pub fn set_dataset(&mut self, dataset: RankedDataset) {
        log::info!(
            "dataset ready: {} valid rows, {} dropped, top {}",
            dataset.len(),
            dataset.dropped,
            dataset.top.len()
        );
        self.teardown();
        self.dataset = Some(dataset);
        self.selected_slice = None;
        self.status_message = None;
        if self.active_tab == Tab::Map {
            self.show_map();
        }
    }

    /// Drop the map view.
    pub fn teardown(&mut self) {
        if self.map.take().is_some() {
            log::debug!("map view torn down");
        }
    }

    // -- loading --

    pub fn is_loading(&self) -> bool {
        self.fetch.is_some()
    }

    /// Start loading `source` on a worker thread. `notify` runs on the
    /// worker once the result is ready. Returns false if a load is
    /// already running.
    pub fn begin_fetch<F>(&mut self, source: DataSource, notify: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.fetch.is_some() {
            log::warn!("ignoring load of {source}: another load is running");
            return false;
        }

        log::info!("loading {source}");
        let (tx, rx) = mpsc::channel();
        let worker_source = source.clone();
        thread::spawn(move || {
            // The receiver may be gone if the dashboard closed meanwhile.
            let _ = tx.send(worker_source.load());
            notify();
        });

        self.fetch = Some(FetchJob { source, rx });
        self.status_message = None;
        true
    }

    /// Pick up a finished load, if any. Returns true when state changed.
    pub fn poll_fetch(&mut self) -> bool {
        let Some(job) = &self.fetch else {
            return false;
        };
        let outcome = match job.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                let source = job.source.clone();
                self.fetch = None;
                log::error!("loader for {source} exited without a result");
                self.status_message = Some(format!("Error: loading {source} was interrupted"));
                return true;
            }
        };

        if let Some(job) = self.fetch.take() {
            self.apply_load(&job.source, outcome);
        }
        true
    }

    /// Prepare freshly loaded rows, or report why loading failed.
    pub fn apply_load(&mut self, source: &DataSource, outcome: FetchResult) {
        match outcome {
            Ok(rows) => {
                let dataset = prepare_with_limit(&rows, self.config.top_n);
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    // -- interaction --

    /// Toggle the pie slice for `index` in the top list.
    pub fn select_slice(&mut self, index: usize) {
        if self.selected_slice == Some(index) {
            self.selected_slice = None;
            self.status_message = None;
            return;
        }
        let Some(record) = self.dataset.as_ref().and_then(|d| d.top.get(index)) else {
            return;
        };
        self.status_message = Some(format!(
            "{}: {} cases",
            record.location,
            thousands(record.total_cases)
        ));
        self.selected_slice = Some(index);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
