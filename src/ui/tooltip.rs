use eframe::egui::{self, Pos2, RichText, Vec2};

use crate::chart::tooltip::{Tooltip, TooltipContent};

/// Offset from the pointer so the tooltip does not sit under the cursor.
const POINTER_OFFSET: Vec2 = Vec2::new(10.0, -20.0);
const FLAG_SIZE: Vec2 = Vec2::new(40.0, 27.0);

/// Floating tooltip drawn on top of everything once per frame.
#[derive(Default)]
pub struct OverlayTooltip {
    pending: Option<(TooltipContent, Pos2)>,
}

impl Tooltip for OverlayTooltip {
    fn show(&mut self, content: &TooltipContent, at: [f32; 2]) {
        self.pending = Some((content.clone(), Pos2::new(at[0], at[1])));
    }

    fn hide(&mut self) {
        self.pending = None;
    }
}

impl OverlayTooltip {
    pub fn paint(&self, ctx: &egui::Context) {
        let Some((content, at)) = &self.pending else {
            return;
        };
        egui::Area::new(egui::Id::new("chart_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(*at + POINTER_OFFSET)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    if let Some(url) = &content.image_url {
                        ui.add(
                            egui::Image::new(url.as_str())
                                .max_width(FLAG_SIZE.x)
                                .max_height(FLAG_SIZE.y),
                        );
                    }
                    ui.label(RichText::new(&content.title).strong());
                    for (label, value) in &content.lines {
                        ui.label(format!("{label}: {value}"));
                    }
                });
            });
    }
}
