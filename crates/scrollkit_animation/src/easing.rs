//! Easing functions for animation progress

/// Easing function type
///
/// The `Power*` family takes an exponent degree 1..=4 (degree 1 is
/// quadratic, degree 3 is quartic), matching the usual web-animation
/// `power1`..`power3` naming. Degrees outside that range are clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Accelerate from rest: `t^(degree + 1)`
    PowerIn(u8),
    /// Decelerate to rest: `1 - (1 - t)^(degree + 1)`
    PowerOut(u8),
    /// Accelerate then decelerate, symmetric around `t = 0.5`
    PowerInOut(u8),
    /// CSS-style cubic bezier with control points (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Discrete staircase with `n` jumps, holding until each jump point
    Steps(u32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::PowerIn(degree) => t.powi(exponent(degree)),
            Easing::PowerOut(degree) => 1.0 - (1.0 - t).powi(exponent(degree)),
            Easing::PowerInOut(degree) => {
                let p = exponent(degree);
                if t < 0.5 {
                    2.0_f32.powi(p - 1) * t.powi(p)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(p) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
            Easing::Steps(n) => {
                if n == 0 || t >= 1.0 {
                    return if t >= 1.0 { 1.0 } else { 0.0 };
                }
                (t.clamp(0.0, 1.0) * n as f32).floor() / n as f32
            }
        }
    }
}

/// Clamp a power degree into 1..=4 and convert to the curve exponent.
#[inline]
fn exponent(degree: u8) -> i32 {
    degree.clamp(1, 4) as i32 + 1
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with a binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter at 120fps.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    // Solve for parameter `p` where bezier_x(p) == x using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = x; // initial guess
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break; // slope too flat, switch to binary search
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    // Horner form: ((1-3p2+3p1)t + 3p2-6p1)t + 3p1) * t
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASINGS: &[Easing] = &[
        Easing::Linear,
        Easing::PowerIn(1),
        Easing::PowerOut(2),
        Easing::PowerInOut(3),
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_exact() {
        for easing in EASINGS {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_power_out_decelerates() {
        // power3.out (quartic out) covers more than half the distance by t=0.25
        let e = Easing::PowerOut(3);
        assert!(e.apply(0.25) > 0.5);
        assert!(e.apply(0.75) > e.apply(0.5));
    }

    #[test]
    fn test_monotone_for_monotone_variants() {
        for easing in EASINGS {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{easing:?} regressed at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_inout_symmetric_midpoint() {
        for degree in 1..=4 {
            let v = Easing::PowerInOut(degree).apply(0.5);
            assert!((v - 0.5).abs() < 1e-6, "degree {degree} midpoint {v}");
        }
    }

    #[test]
    fn test_inout_continuous_at_midpoint() {
        for degree in 1..=4 {
            let e = Easing::PowerInOut(degree);
            let left = e.apply(0.5 - 1e-5);
            let right = e.apply(0.5 + 1e-5);
            assert!(
                (left - right).abs() < 1e-3,
                "degree {degree} jumps: {left} vs {right}"
            );
        }
    }

    #[test]
    fn test_steps_one_holds_until_end() {
        let e = Easing::Steps(1);
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.0);
        assert_eq!(e.apply(0.999), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
    }

    #[test]
    fn test_steps_four_staircase() {
        let e = Easing::Steps(4);
        assert_eq!(e.apply(0.30), 0.25);
        assert_eq!(e.apply(0.60), 0.5);
        assert_eq!(e.apply(0.80), 0.75);
    }

    #[test]
    fn test_bezier_identity_diagonal() {
        // Control points on the diagonal degenerate to linear
        let e = Easing::CubicBezier(0.3, 0.3, 0.7, 0.7);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((e.apply(t) - t).abs() < 1e-4, "t = {t}");
        }
    }
}
