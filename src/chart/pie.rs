use std::f64::consts::{PI, TAU};

/// One wedge of a pie. Angles are radians measured clockwise from
/// 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Index of the value this slice was built from.
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }

    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Lay out slices for `values`, largest first around the circle.
///
/// Slices come back in input order. Non-positive values get an empty
/// slice, and an all-zero input gives only empty slices.
pub fn pie_layout(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let k = if total > 0.0 { TAU / total } else { 0.0 };

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut slices: Vec<Slice> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| Slice {
            index,
            value,
            start_angle: 0.0,
            end_angle: 0.0,
        })
        .collect();

    let mut angle = 0.0;
    for i in order {
        let value = values[i];
        let span = if value > 0.0 { value * k } else { 0.0 };
        slices[i].start_angle = angle;
        slices[i].end_angle = angle + span;
        angle += span;
    }
    slices
}

/// Clockwise-from-top angle of the vector `(dx, dy)`, `dy` pointing up.
pub fn angle_of(dx: f64, dy: f64) -> f64 {
    dx.atan2(dy).rem_euclid(TAU)
}

/// Slice covering the given angle, if any.
pub fn slice_at(slices: &[Slice], angle: f64) -> Option<&Slice> {
    slices.iter().find(|s| s.span() > 0.0 && s.contains(angle))
}

/// Point on a circle of `radius` at `angle`, in y-up coordinates.
pub fn arc_point(radius: f64, angle: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Closed polygon outlining a wedge, in y-up coordinates around the
/// origin. Roughly one vertex per degree of arc.
pub fn wedge_outline(slice: &Slice, radius: f64) -> Vec<[f64; 2]> {
    let steps = ((slice.span() / (PI / 180.0)).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = slice.start_angle + slice.span() * i as f64 / steps as f64;
        points.push(arc_point(radius, a));
    }
    points
}

/// SVG path for a wedge centred on the origin (SVG y points down).
pub fn wedge_path(slice: &Slice, radius: f64) -> String {
    let span = slice.span();
    if span <= 0.0 {
        return String::new();
    }
    if span >= TAU - 1e-9 {
        return format!(
            "M0,{:.3}A{r},{r},0,1,1,0,{:.3}A{r},{r},0,1,1,0,{:.3}Z",
            -radius,
            radius,
            -radius,
            r = radius
        );
    }
    let [x0, y0] = arc_point(radius, slice.start_angle);
    let [x1, y1] = arc_point(radius, slice.end_angle);
    let large = if span > PI { 1 } else { 0 };
    format!(
        "M{x0:.3},{:.3}A{r},{r},0,{large},1,{x1:.3},{:.3}L0,0Z",
        -y0,
        -y1,
        r = radius
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_cover_full_circle() {
        let slices = pie_layout(&[5.0, 3.0, 2.0]);
        let total: f64 = slices.iter().map(Slice::span).sum();
        assert!((total - TAU).abs() < 1e-9);
        assert_eq!(slices[0].start_angle, 0.0);
        assert!((slices[0].end_angle - PI).abs() < 1e-9);
        assert!((slices[2].end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn largest_value_starts_at_top() {
        let slices = pie_layout(&[1.0, 3.0]);
        assert_eq!(slices[0].index, 0);
        assert_eq!(slices[1].start_angle, 0.0);
        assert!((slices[0].start_angle - slices[1].end_angle).abs() < 1e-12);
    }

    #[test]
    fn zero_total_gives_empty_slices() {
        let slices = pie_layout(&[0.0, 0.0]);
        assert!(slices.iter().all(|s| s.span() == 0.0));
        assert!(slice_at(&slices, 1.0).is_none());
    }

    #[test]
    fn hit_testing_by_angle() {
        let slices = pie_layout(&[1.0, 1.0, 1.0, 1.0]);
        // straight right (3 o'clock) is a quarter turn in
        let right = angle_of(1.0, 0.0);
        assert!((right - PI / 2.0).abs() < 1e-12);
        assert_eq!(slice_at(&slices, right).map(|s| s.index), Some(1));
        // up and slightly left is the last quarter
        assert_eq!(slice_at(&slices, angle_of(-0.1, 1.0)).map(|s| s.index), Some(3));
    }

    #[test]
    fn half_circle_path() {
        let slice = Slice {
            index: 0,
            value: 1.0,
            start_angle: 0.0,
            end_angle: PI,
        };
        assert_eq!(wedge_path(&slice, 200.0), "M0.000,-200.000A200,200,0,0,1,0.000,200.000L0,0Z");
    }

    #[test]
    fn outline_starts_at_centre() {
        let slice = pie_layout(&[1.0, 1.0])[0];
        let outline = wedge_outline(&slice, 10.0);
        assert_eq!(outline[0], [0.0, 0.0]);
        let [x, y] = outline[1];
        assert!(x.abs() < 1e-12 && (y - 10.0).abs() < 1e-12);
    }
}
