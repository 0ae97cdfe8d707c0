/// Tabulated turbine power curve.
///
/// Output fraction of nameplate power vs hub-height wind speed, piecewise
/// linear between breakpoints. Shape follows a generic 2 MW class onshore
/// turbine: cut-in 3 m/s, rated 12 m/s, cut-out 25 m/s.

/// (wind speed m/s, fraction of rated output)
const CURVE: &[(f64, f64)] = &[
    (3.0, 0.0),
    (4.0, 0.05),
    (5.0, 0.11),
    (6.0, 0.19),
    (7.0, 0.30),
    (8.0, 0.44),
    (9.0, 0.60),
    (10.0, 0.77),
    (11.0, 0.92),
    (12.0, 1.0),
];

pub const CUT_IN_MS: f64 = 3.0;
pub const RATED_MS: f64 = 12.0;
pub const CUT_OUT_MS: f64 = 25.0;

/// Interpolated output fraction in [0, 1] for a given wind speed.
/// Zero below cut-in and at/above cut-out, flat at 1.0 between rated
/// and cut-out.
pub fn output_fraction(wind_speed_ms: f64) -> f64 {
    if !wind_speed_ms.is_finite() || wind_speed_ms < CUT_IN_MS || wind_speed_ms >= CUT_OUT_MS {
        return 0.0;
    }
    if wind_speed_ms >= RATED_MS {
        return 1.0;
    }
    // Find the bracketing segment and interpolate.
    for pair in CURVE.windows(2) {
        let (v0, f0) = pair[0];
        let (v1, f1) = pair[1];
        if wind_speed_ms <= v1 {
            let t = (wind_speed_ms - v0) / (v1 - v0);
            return f0 + t * (f1 - f0);
        }
    }
    1.0
}
