use orrery_config::CameraConfig;
use orrery_core::vector::{self, Vector3};

use crate::SceneState;

/// Camera that trails a body at a clamped offset.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    target: Option<String>,
    offset: Vector3,
    up: Vector3,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl FollowCamera {
    /// `up` is the scene-space up direction; it is normalised here.
    pub fn new(config: &CameraConfig, up: Vector3) -> Self {
        let mut camera = Self {
            target: None,
            offset: config.default_offset,
            up: vector::normalize(&up),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        };
        camera.clamp();
        camera
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn offset(&self) -> Vector3 {
        self.offset
    }

    pub fn distance(&self) -> f64 {
        vector::norm(&self.offset)
    }

    /// Unchecked retarget; [`SceneState::follow`] validates the name first.
    pub(crate) fn set_target(&mut self, target: Option<String>) {
        self.target = target;
    }

    /// Scale the offset; factors below one move closer. Non-positive factors are ignored.
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.offset = vector::scale(&self.offset, factor);
            self.clamp();
        }
    }

    /// Swing the offset about the up axis by `yaw` radians.
    pub fn orbit_around(&mut self, yaw: f64) {
        if !yaw.is_finite() {
            return;
        }
        let k = self.up;
        let v = self.offset;
        let (sin, cos) = yaw.sin_cos();
        let k_cross_v = vector::cross(&k, &v);
        let k_dot_v = vector::dot(&k, &v);
        self.offset = vector::add(
            &vector::add(&vector::scale(&v, cos), &vector::scale(&k_cross_v, sin)),
            &vector::scale(&k, k_dot_v * (1.0 - cos)),
        );
        self.clamp();
    }

    /// World position being looked at: the followed body, or the origin.
    pub fn look_at(&self, scene: &SceneState) -> Vector3 {
        self.target
            .as_deref()
            .and_then(|name| scene.world_position(name))
            .unwrap_or(vector::ZERO)
    }

    /// World position of the camera.
    pub fn eye(&self, scene: &SceneState) -> Vector3 {
        vector::add(&self.look_at(scene), &self.offset)
    }

    fn clamp(&mut self) {
        let distance = vector::norm(&self.offset);
        if distance == 0.0 || !distance.is_finite() {
            self.offset = vector::scale(&self.up, self.min_distance);
            return;
        }
        let clamped = distance.clamp(self.min_distance, self.max_distance);
        if clamped != distance {
            self.offset = vector::scale(&self.offset, clamped / distance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> FollowCamera {
        let config = CameraConfig {
            follow: None,
            min_distance: 2.0,
            max_distance: 500.0,
            default_offset: [0.0, 40.0, 120.0],
        };
        FollowCamera::new(&config, [0.0, 1.0, 0.0])
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom(1e6);
        assert!((cam.distance() - 500.0).abs() < 1e-9);
        cam.zoom(1e-9);
        assert!((cam.distance() - 2.0).abs() < 1e-12);
        let before = cam.offset();
        cam.zoom(-1.0);
        cam.zoom(0.0);
        assert_eq!(cam.offset(), before);
    }

    #[test]
    fn orbit_around_keeps_height_and_distance() {
        let mut cam = camera();
        let start = cam.distance();
        cam.orbit_around(std::f64::consts::FRAC_PI_2);
        let offset = cam.offset();
        assert!((cam.distance() - start).abs() < 1e-9);
        assert!((offset[1] - 40.0).abs() < 1e-9);
        assert!((offset[0] - 120.0).abs() < 1e-9, "offset = {:?}", offset);
        assert!(offset[2].abs() < 1e-9);
    }

    #[test]
    fn default_offset_outside_range_is_pulled_in() {
        let config = CameraConfig {
            follow: None,
            min_distance: 10.0,
            max_distance: 20.0,
            default_offset: [0.0, 0.0, 0.0],
        };
        let cam = FollowCamera::new(&config, [0.0, 0.0, 3.0]);
        assert_eq!(cam.offset(), [0.0, 0.0, 10.0]);
    }
}
