use super::tooltip::{Tooltip, TooltipContent};

/// Bar under `(x, y)` for bars centred on `0, 1, 2, …` with the given
/// width, each rising from 0 to its value.
pub fn bar_at(values: &[f64], x: f64, y: f64, width: f64) -> Option<usize> {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > width / 2.0 {
        return None;
    }
    let index = index as usize;
    let value = *values.get(index)?;
    (y >= 0.0 && y <= value).then_some(index)
}

/// Closest circle containing `pointer`. Circles are `(centre, radius)`
/// in screen units.
pub fn nearest_circle(circles: &[([f32; 2], f32)], pointer: [f32; 2]) -> Option<usize> {
    circles
        .iter()
        .enumerate()
        .map(|(i, (c, r))| (i, (c[0] - pointer[0]).hypot(c[1] - pointer[1]), *r))
        .filter(|(_, d, r)| d <= r)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _, _)| i)
}

/// Show `content` at `at` when something is hit, hide otherwise.
pub fn present(tooltip: &mut dyn Tooltip, content: Option<TooltipContent>, at: [f32; 2]) {
    match content {
        Some(content) => tooltip.show(&content, at),
        None => tooltip.hide(),
    }
}
