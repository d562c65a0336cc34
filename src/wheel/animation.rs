//! Spin animation progress model
//!
//! Mirrors the CSS `ease-out` transition the wheel element runs, so the
//! rotation shown at any frame can be computed from elapsed time alone.

/// CSS `ease-out` control points: cubic-bezier(0, 0, 0.58, 1)
const EASE_OUT_X1: f64 = 0.0;
const EASE_OUT_Y1: f64 = 0.0;
const EASE_OUT_X2: f64 = 0.58;
const EASE_OUT_Y2: f64 = 1.0;

/// Bisection steps for inverting the curve's x(s); 2^-40 is well below a pixel
const SOLVE_ITERATIONS: u32 = 40;

/// A single running spin: target rotation over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    /// Target rotation in degrees
    pub target_deg: f64,
    /// Animation length in milliseconds
    pub duration_ms: f64,
}

impl SpinAnimation {
    pub fn new(target_deg: f64, duration_ms: f64) -> Self {
        Self {
            target_deg,
            duration_ms,
        }
    }

    /// Linear time fraction in [0, 1]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 || elapsed_ms.is_nan() {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Unwrapped rotation shown after `elapsed_ms`
    pub fn angle_at(&self, elapsed_ms: f64) -> f64 {
        ease_out(self.progress(elapsed_ms)) * self.target_deg
    }
}

/// Evaluate the ease-out timing function at time fraction `t`
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }

    // x(s) is monotonic for control x values in [0, 1]
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..SOLVE_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, EASE_OUT_X1, EASE_OUT_X2) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier((lo + hi) / 2.0, EASE_OUT_Y1, EASE_OUT_Y2)
}

/// One axis of a cubic bezier anchored at 0 and 1
#[inline]
fn bezier(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(-3.0), 0.0);
        assert_eq!(ease_out(7.0), 1.0);
    }

    #[test]
    fn test_ease_out_front_loads_rotation() {
        // Ease-out covers more than half the distance by the halfway point
        let half = ease_out(0.5);
        assert!(half > 0.6 && half < 0.75, "ease_out(0.5) = {}", half);
    }

    #[test]
    fn test_angle_at_spans_target() {
        let anim = SpinAnimation::new(7200.0, 5000.0);
        assert_eq!(anim.angle_at(0.0), 0.0);
        assert_eq!(anim.angle_at(5000.0), 7200.0);
        assert_eq!(anim.angle_at(9000.0), 7200.0);
        assert!(anim.angle_at(4999.0) < 7200.0);
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let anim = SpinAnimation::new(6000.0, 0.0);
        assert_eq!(anim.angle_at(0.0), 6000.0);
    }

    proptest! {
        #[test]
        fn angle_is_monotonic(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
            let anim = SpinAnimation::new(8000.0, 5000.0);
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(anim.angle_at(early) <= anim.angle_at(late) + 1e-9);
        }
    }
}
