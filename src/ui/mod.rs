/// egui front end: panels, the six chart tabs, and the map tab.
pub mod charts;
pub mod map;
pub mod panels;
pub mod tooltip;
