//! Camera and orbit navigation
//!
//! The orbit controller keeps the camera on a sphere around a target point.
//! Pointer input is ignored while orbiting is toggled off with the `o` key.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

/// Vertical field of view (degrees)
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
/// Initial camera position, looking at the court center
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 15.0, 30.0);

/// Key that toggles orbiting
pub const ORBIT_TOGGLE_KEY: &str = "o";

/// Keeps the camera off the poles where the view basis degenerates
const POLAR_EPSILON: f32 = 1e-4;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 200.0;
/// Dolly factor per wheel notch
const ZOOM_STEP: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov: CAMERA_FOV_DEG.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl PerspectiveCamera {
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Which drag gesture is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

impl DragMode {
    /// Map a DOM mouse button (0 = primary, 2 = secondary)
    pub fn from_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(DragMode::Rotate),
            2 => Some(DragMode::Pan),
            _ => None,
        }
    }
}

/// Orbit camera controller
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub camera: PerspectiveCamera,
    target: Vec3,
    /// Distance from target
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X
    theta: f32,
    /// Polar angle from +Y
    phi: f32,
    rotate_speed: f32,
    drag: Option<DragMode>,
    last_pointer: Vec2,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(CAMERA_START, Vec3::ZERO)
    }
}

impl OrbitControls {
    /// Controller for a camera at `position` looking at `target`
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(MIN_DISTANCE);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            enabled: true,
            camera: PerspectiveCamera::default(),
            target,
            radius,
            theta,
            phi: phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            rotate_speed: 1.0,
            drag: None,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Camera position in world space
    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_phi * self.theta.sin(),
                    self.phi.cos(),
                    sin_phi * self.theta.cos(),
                )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.camera.projection(aspect) * self.view()
    }

    /// Handle a key press. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == ORBIT_TOGGLE_KEY {
            self.enabled = !self.enabled;
            log::info!(
                "Orbit camera {}",
                if self.enabled { "enabled" } else { "disabled" }
            );
            true
        } else {
            false
        }
    }

    pub fn pointer_down(&mut self, mode: DragMode, x: f32, y: f32) {
        if !self.enabled {
            return;
        }
        self.drag = Some(mode);
        self.last_pointer = Vec2::new(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Continue a drag. `viewport_height` is in the same units as x/y.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let pointer = Vec2::new(x, y);
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;

        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        match self.drag {
            Some(DragMode::Rotate) => self.rotate(delta, viewport_height),
            Some(DragMode::Pan) => self.pan(delta, viewport_height),
            None => {}
        }
    }

    /// Wheel scroll; positive `delta_y` zooms out
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enabled || delta_y == 0.0 {
            return;
        }
        let scale = if delta_y > 0.0 {
            1.0 / ZOOM_STEP
        } else {
            ZOOM_STEP
        };
        self.radius = (self.radius * scale).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let per_pixel = 2.0 * PI * self.rotate_speed / viewport_height;
        self.theta -= delta.x * per_pixel;
        self.phi = (self.phi - delta.y * per_pixel).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        // World units per pixel at the target's depth
        let world_height = 2.0 * self.radius * (self.camera.fov / 2.0).tan();
        let per_pixel = world_height / viewport_height;

        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.target += (-delta.x * right + delta.y * up) * per_pixel;
    }
}
