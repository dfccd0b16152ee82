#![forbid(unsafe_code)]

//! DOM coordinate helpers.

/// Y coordinate of a mouse event relative to the minimap canvas.
///
/// Uses `offsetY`, falling back to `layerY` when `offsetY` is zero or not a
/// number (older engines report only one of the two).
#[must_use]
pub fn pointer_y(offset_y: f64, layer_y: f64) -> f64 {
    if offset_y != 0.0 && !offset_y.is_nan() {
        return offset_y;
    }
    if layer_y.is_nan() { 0.0 } else { layer_y }
}

/// Row index from a JS number: truncated toward zero, with NaN, negatives,
/// and non-numbers mapped to 0.
#[must_use]
pub fn row_from_js(value: Option<f64>) -> usize {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v as usize,
        Some(v) if v == f64::INFINITY => usize::MAX,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_wins_when_present() {
        assert_eq!(pointer_y(120.0, 340.0), 120.0);
    }

    #[test]
    fn layer_is_the_fallback() {
        assert_eq!(pointer_y(0.0, 340.0), 340.0);
        assert_eq!(pointer_y(f64::NAN, 12.0), 12.0);
        assert_eq!(pointer_y(f64::NAN, f64::NAN), 0.0);
    }

    #[test]
    fn rows_are_clamped_and_truncated() {
        assert_eq!(row_from_js(Some(41.9)), 41);
        assert_eq!(row_from_js(Some(-3.0)), 0);
        assert_eq!(row_from_js(Some(f64::NAN)), 0);
        assert_eq!(row_from_js(None), 0);
        assert_eq!(row_from_js(Some(f64::INFINITY)), usize::MAX);
    }
}
