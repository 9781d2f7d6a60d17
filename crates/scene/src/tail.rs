//! Anti-solar comet tails.

use orrery_core::vector::{self, Vector3};

/// Tail direction (unit, away from the Sun) and length in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailGeometry {
    pub direction: Vector3,
    pub length: f64,
}

/// Tail for a comet at `position` with the Sun at `sun`, both in AU.
///
/// Length falls off as `base_length / r²` and is capped at `4 · base_length`, which also covers a
/// comet sitting on the Sun.
pub fn comet_tail(position: &Vector3, sun: &Vector3, base_length: f64) -> TailGeometry {
    let away = vector::sub(position, sun);
    let r = vector::norm(&away);
    let cap = 4.0 * base_length;
    let length = if r > 0.0 {
        (base_length / (r * r)).min(cap)
    } else {
        cap
    };
    TailGeometry {
        direction: vector::normalize(&away),
        length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_away_from_the_sun() {
        let tail = comet_tail(&[0.0, -2.0, 0.0], &[0.0, 0.0, 0.0], 6.0);
        assert_eq!(tail.direction, [0.0, -1.0, 0.0]);
        assert!((tail.length - 1.5).abs() < 1e-12);

        let offset_sun = comet_tail(&[3.0, 1.0, 0.0], &[1.0, 1.0, 0.0], 6.0);
        assert_eq!(offset_sun.direction, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn length_is_capped_near_the_sun() {
        let tail = comet_tail(&[0.1, 0.0, 0.0], &[0.0, 0.0, 0.0], 5.0);
        assert_eq!(tail.length, 20.0);
        let degenerate = comet_tail(&[0.0; 3], &[0.0; 3], 5.0);
        assert_eq!(degenerate.length, 20.0);
        assert_eq!(degenerate.direction, [0.0; 3]);
    }
}
