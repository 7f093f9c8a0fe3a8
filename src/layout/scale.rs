//! Scale-to-fit pre-pass.
//!
//! Instead of paginating, shrink the whole document uniformly so it fits
//! on a single page. The factor comes from a measuring pass with the
//! unscaled style sheet.

/// Uniform factor that makes `total_height` fit in `available`.
///
/// Never enlarges: content that already fits keeps factor 1.
pub fn fit_factor(total_height: f64, available: f64) -> f64 {
    if total_height <= available || total_height <= 0.0 || available <= 0.0 {
        1.0
    } else {
        available / total_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitting_content_is_not_scaled() {
        assert_eq!(fit_factor(100.0, 277.0), 1.0);
        assert_eq!(fit_factor(277.0, 277.0), 1.0);
        assert_eq!(fit_factor(0.0, 277.0), 1.0);
    }

    #[test]
    fn tall_content_shrinks_proportionally() {
        assert!((fit_factor(554.0, 277.0) - 0.5).abs() < 1e-12);
    }
}
