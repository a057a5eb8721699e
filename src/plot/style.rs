//! Visual constants for cluster scatter plots.

/// Marker area (points²) for noise points.
pub const NOISE_MARKER_AREA: f32 = 0.1;
/// Marker area for clusters larger than the size threshold.
pub const LARGE_CLUSTER_MARKER_AREA: f32 = 10.0;
/// Marker area for clusters at or below the size threshold.
pub const SMALL_CLUSTER_MARKER_AREA: f32 = 1.0;
/// Legend glyph area, independent of the on-plot marker area.
pub const LEGEND_GLYPH_AREA: f32 = 30.0;
pub const LEGEND_FONT_SIZE: f32 = 10.0;
pub const TITLE_FONT_SIZE: f32 = 15.0;

/// Pixels per inch used when exporting figures.
pub const PIXELS_PER_INCH: f32 = 100.0;
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const NOISE_COLOR: Rgb = Rgb::new(128, 128, 128);

/// Stable colour for a cluster id; hues walk the golden angle so
/// neighbouring ids stay distinguishable.
pub fn cluster_color(cluster_id: i32) -> Rgb {
    if cluster_id < 0 {
        return NOISE_COLOR;
    }
    let hue = (cluster_id as f32 * 137.507_76) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.62, 0.86);
    Rgb::new(r, g, b)
}

/// Markers whose radius falls below this are drawn as single pixels.
pub const MIN_CIRCLE_RADIUS_PX: f64 = 0.5;

/// Convert a marker area in points² to a pixel radius.
pub fn marker_radius_px(area: f32) -> f64 {
    let diameter_pt = f64::from(area.max(0.0)).sqrt();
    diameter_pt / 2.0 * f64::from(PIXELS_PER_INCH / POINTS_PER_INCH)
}

/// Radius of a legend glyph, never smaller than one pixel.
pub fn legend_radius_px(area: f32) -> f64 {
    marker_radius_px(area).round().max(1.0)
}

/// Convert a font size in points to pixels.
pub fn font_px(size_pt: f32) -> f64 {
    f64::from(size_pt * PIXELS_PER_INCH / POINTS_PER_INCH)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let hh = (h / 60.0) % 6.0;
    let x = c * (1.0 - ((hh % 2.0) - 1.0).abs());
    let (r1, g1, b1) = match hh as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let channel = |value: f32| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r1), channel(g1), channel(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_and_negative_ids_are_gray() {
        assert_eq!(cluster_color(-1), NOISE_COLOR);
    }

    #[test]
    fn cluster_colors_are_stable_and_distinct() {
        assert_eq!(cluster_color(3), cluster_color(3));
        assert_ne!(cluster_color(0), cluster_color(1));
        assert_ne!(cluster_color(1), NOISE_COLOR);
    }

    #[test]
    fn marker_radius_keeps_every_size_class_distinct() {
        let noise = marker_radius_px(NOISE_MARKER_AREA);
        let small = marker_radius_px(SMALL_CLUSTER_MARKER_AREA);
        let large = marker_radius_px(LARGE_CLUSTER_MARKER_AREA);
        assert!(noise < MIN_CIRCLE_RADIUS_PX);
        assert!(small >= MIN_CIRCLE_RADIUS_PX);
        assert!(noise < small && small < large);
        assert!(legend_radius_px(LEGEND_GLYPH_AREA) > large);
        assert_eq!(legend_radius_px(0.0), 1.0);
    }
}
