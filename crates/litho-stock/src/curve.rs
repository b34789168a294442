//! Five-control-point tone curves.
//!
//! Each film stock defines its per-channel response as five control
//! points sampled at `x = 0, .25, .5, .75, 1.0`. Evaluating the curve at
//! an arbitrary `t` interpolates between the two surrounding control
//! points with a smoothstep blend, giving a curve that passes exactly
//! through the control points but has zero slope discontinuity at them.

use litho_math::smoothstep;

/// Five y-values sampled at `x = 0, .25, .5, .75, 1.0`.
pub type ControlPoints = [f32; 5];

/// Evaluates a piecewise-smoothstep curve defined by `points` at `t`.
///
/// `t` is clamped to `[0, 1]` before lookup. Within the segment
/// containing `t`, the two bounding control points are blended with
/// [`smoothstep`]'s `3u^2 - 2u^3` weighting rather than a plain lerp.
///
/// # Example
///
/// ```rust
/// use litho_stock::piecewise_smoothstep;
///
/// let identity = [0.0, 0.25, 0.5, 0.75, 1.0];
/// assert!((piecewise_smoothstep(&identity, 0.0) - 0.0).abs() < 1e-6);
/// assert!((piecewise_smoothstep(&identity, 1.0) - 1.0).abs() < 1e-6);
/// ```
pub fn piecewise_smoothstep(points: &ControlPoints, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let segment = ((t / 0.25).floor() as usize).min(3);
    let x0 = segment as f32 * 0.25;
    let u = smoothstep(x0, x0 + 0.25, t);
    let a = points[segment];
    let b = points[segment + 1];
    a + (b - a) * u
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_points_pass_through_endpoints() {
        let identity = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert!((piecewise_smoothstep(&identity, 0.0) - 0.0).abs() < 1e-6);
        assert!((piecewise_smoothstep(&identity, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn passes_through_interior_control_points() {
        let points = [0.0, 0.1, 0.6, 0.9, 1.0];
        for (i, &expected) in points.iter().enumerate() {
            let t = i as f32 * 0.25;
            assert!((piecewise_smoothstep(&points, t) - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let points = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert_eq!(piecewise_smoothstep(&points, -1.0), piecewise_smoothstep(&points, 0.0));
        assert_eq!(piecewise_smoothstep(&points, 2.0), piecewise_smoothstep(&points, 1.0));
    }

    #[test]
    fn flat_curve_is_constant() {
        let points = [0.5; 5];
        for i in 0..=8 {
            let t = i as f32 / 8.0;
            assert!((piecewise_smoothstep(&points, t) - 0.5).abs() < 1e-6);
        }
    }
}
