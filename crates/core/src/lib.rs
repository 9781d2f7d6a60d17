//! Core units, constants, and shared primitives for the Orrery workspace.

/// Astronomical and calendar constants.
pub mod constants {
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Days per Julian century.
    pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
    /// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
    pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
    /// Length of the sidereal year in days.
    pub const SIDEREAL_YEAR_DAYS: f64 = 365.256_363;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::AU_KM;

    /// Convert astronomical units to kilometres.
    #[inline]
    pub fn au_to_km(v: f64) -> f64 {
        v * AU_KM
    }

    /// Convert kilometres to astronomical units.
    #[inline]
    pub fn km_to_au(v: f64) -> f64 {
        v / AU_KM
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD};

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Julian centuries elapsed since J2000.0 at the given Julian Date.
    #[inline]
    pub fn julian_centuries_since_j2000(jd: f64) -> f64 {
        (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
    }

    /// Julian Date for a Unix timestamp expressed in (possibly fractional) seconds.
    #[inline]
    pub fn jd_from_unix_seconds(seconds: f64) -> f64 {
        UNIX_EPOCH_JD + seconds_to_days(seconds)
    }

    /// Unix timestamp in seconds for a Julian Date.
    #[inline]
    pub fn unix_seconds_from_jd(jd: f64) -> f64 {
        days_to_seconds(jd - UNIX_EPOCH_JD)
    }
}

/// Angle normalisation helpers.
pub mod angle {
    use std::f64::consts::{PI, TAU};

    /// Reduce an angle to `[0, 2π)`.
    #[inline]
    pub fn normalize_two_pi(angle: f64) -> f64 {
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    /// Reduce an angle to `(-π, π]`.
    #[inline]
    pub fn wrap_pi(angle: f64) -> f64 {
        let wrapped = normalize_two_pi(angle);
        if wrapped > PI { wrapped - TAU } else { wrapped }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU or scene units depending on context.
    pub type Vector3 = [f64; 3];

    /// The zero vector.
    pub const ZERO: Vector3 = [0.0, 0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector in the direction of `v`; the zero vector maps to itself.
    #[inline]
    pub fn normalize(v: &Vector3) -> Vector3 {
        let n = norm(v);
        if n > 0.0 { scale(v, 1.0 / n) } else { ZERO }
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn julian_date_round_trips_through_unix_seconds() {
        let jd = time::jd_from_unix_seconds(946_728_000.0);
        assert!((jd - constants::J2000_JD).abs() < 1e-9, "jd = {jd}");
        let secs = time::unix_seconds_from_jd(constants::J2000_JD);
        assert!((secs - 946_728_000.0).abs() < 1e-3);
    }

    #[test]
    fn angles_wrap_into_expected_ranges() {
        assert_eq!(angle::normalize_two_pi(0.0), 0.0);
        assert!((angle::normalize_two_pi(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
        assert!((angle::normalize_two_pi(5.0 * TAU + 1.0) - 1.0).abs() < 1e-9);
        assert!(angle::normalize_two_pi(-1e-300) < TAU);
        assert!((angle::wrap_pi(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((angle::wrap_pi(PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn normalize_handles_zero_vector() {
        assert_eq!(vector::normalize(&vector::ZERO), vector::ZERO);
        let unit = vector::normalize(&[3.0, 0.0, 4.0]);
        assert!((vector::norm(&unit) - 1.0).abs() < 1e-12);
        assert_eq!(vector::cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }
}
