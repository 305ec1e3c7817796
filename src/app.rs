use eframe::egui;

use crate::chart::tooltip::Tooltip;
use crate::chart::ChartKind;
use crate::config::DashboardConfig;
use crate::state::{DashboardState, Tab};
use crate::ui::tooltip::OverlayTooltip;
use crate::ui::{charts, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: DashboardState,
    tooltip: OverlayTooltip,
}

impl DashboardApp {
    /// Build the app and start fetching the configured dataset.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut state = DashboardState::new(config);
        let source = state.config.source();
        panels::start_load(&cc.egui_ctx, &mut state, source);
        Self {
            state,
            tooltip: OverlayTooltip::default(),
        }
    }

    fn central(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        let tooltip = &mut self.tooltip;

        if state.active_tab() == Tab::Map {
            match state.map_mut() {
                Some(view) => map::map_view(ui, view, tooltip),
                None => waiting(ui, state.is_loading()),
            }
            return;
        }

        let Some(dataset) = &state.dataset else {
            return waiting(ui, state.is_loading());
        };
        let top = &dataset.top;

        match state.active_tab() {
            Tab::Chart(ChartKind::Bar) => charts::bar_chart(ui, top, tooltip),
            Tab::Chart(ChartKind::Pie) => {
                if let Some(index) = charts::pie_chart(ui, top, state.selected_slice) {
                    state.select_slice(index);
                }
            }
            Tab::Chart(ChartKind::Line) => charts::line_chart(ui, top, tooltip),
            Tab::Chart(ChartKind::Bubble) => charts::bubble_chart(ui, top, tooltip),
            Tab::Chart(ChartKind::Area) => charts::area_chart(ui, top),
            Tab::Chart(ChartKind::Scatter) => charts::scatter_chart(ui, top, tooltip),
            Tab::Map => {}
        }
    }
}

fn waiting(ui: &mut egui::Ui, loading: bool) {
    ui.centered_and_justified(|ui: &mut egui::Ui| {
        if loading {
            ui.spinner();
        } else {
            ui.heading("No data yet  (File → Open CSV… or Reload from web)");
        }
    });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_fetch();
        self.tooltip.hide();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: tabs and ranking ----
        egui::SidePanel::left("tab_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.central(ui);
        });

        self.tooltip.paint(ctx);
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        self.state.teardown();
    }
}
