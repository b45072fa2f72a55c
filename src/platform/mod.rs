//! Platform layer
//!
//! Browser DOM plumbing lives in [`web`]; the helpers here are plain values
//! shared with the native build and its tests.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Markup of the controls overlay
pub const INSTRUCTIONS_HTML: &str = "<h3>Controls:</h3><p>O - Toggle orbit camera</p>";

/// Inline CSS of the controls overlay, pinned to the bottom-left corner
pub const INSTRUCTIONS_STYLE: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("bottom", "20px"),
    ("left", "20px"),
    ("color", "white"),
    ("font-size", "16px"),
    ("font-family", "Arial, sans-serif"),
];

/// Backing-store size of a canvas shown at `css_width` x `css_height`.
/// Never returns a zero dimension.
pub fn canvas_pixel_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let scale = |v: f64| ((v * dpr).round().max(1.0)) as u32;
    (scale(css_width), scale(css_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_pixel_size() {
        assert_eq!(canvas_pixel_size(800.0, 600.0, 1.0), (800, 600));
        assert_eq!(canvas_pixel_size(800.0, 600.0, 2.0), (1600, 1200));
        assert_eq!(canvas_pixel_size(0.0, 0.0, 2.0), (1, 1));
        assert_eq!(canvas_pixel_size(100.0, 50.0, f64::NAN), (100, 50));
    }

    #[test]
    fn test_overlay_text() {
        assert!(INSTRUCTIONS_HTML.contains("Controls:"));
        assert!(INSTRUCTIONS_HTML.contains("O - Toggle orbit camera"));
        assert!(INSTRUCTIONS_STYLE.contains(&("bottom", "20px")));
    }
}
