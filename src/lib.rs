//! Court Scene - an interactive 3D basketball court
//!
//! Core modules:
//! - `layout`: Pure procedural layout of the court, hoops and ball
//! - `scene`: Retained scene graph the layout is registered into
//! - `material`: Material palette and color-management policy
//! - `controls`: Camera and orbit navigation
//! - `textures`: Ball texture maps and their load status
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser DOM wiring

pub mod controls;
pub mod error;
pub mod layout;
pub mod material;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod textures;

pub use error::SceneError;
pub use layout::CourtLayout;
pub use material::ColorPolicy;
pub use scene::SceneGraph;
pub use settings::Settings;

use glam::Vec3;

/// Real-world court measurements (meters, Y up)
pub mod consts {
    /// Court slab (30 x 15 = 2:1 ratio)
    pub const COURT_LENGTH: f32 = 30.0;
    pub const COURT_WIDTH: f32 = 15.0;
    pub const COURT_THICKNESS: f32 = 0.2;
    /// Baseline x-offset of each court half
    pub const COURT_EDGE_X: f32 = COURT_LENGTH / 2.0;

    /// Marking heights above the slab (top surface sits at 0.1)
    pub const CENTER_MARKING_Y: f32 = 0.11;
    pub const THREE_POINT_Y: f32 = 0.201;

    pub const CENTER_CIRCLE_RADIUS: f32 = 1.8;
    /// Sample count for every sampled curve on the court
    pub const CURVE_SAMPLES: usize = 64;

    pub const THREE_POINT_RADIUS: f32 = 6.75;
    pub const THREE_POINT_SIDE_OFFSET: f32 = 4.7;

    /// Rim height (10 feet)
    pub const HOOP_HEIGHT: f32 = 3.05;

    pub const POLE_RADIUS: f32 = 0.1;
    pub const POLE_HEIGHT: f32 = 4.0;
    pub const POLE_CENTER_Y: f32 = POLE_HEIGHT / 2.0;
    /// Arm starts this far above the hoop height and slopes down to the backboard
    pub const ARM_RISE: f32 = 0.5;
    /// Fixed value preserving 1/3 of the earlier arm length
    pub const ARM_LENGTH: f32 = 0.4;

    pub const BACKBOARD_WIDTH: f32 = 1.8;
    pub const BACKBOARD_HEIGHT: f32 = 1.05;
    pub const BACKBOARD_THICKNESS: f32 = 0.05;

    pub const RIM_RADIUS: f32 = 0.45;
    pub const RIM_THICKNESS: f32 = 0.05;
    pub const RIM_CLEARANCE: f32 = 0.02;
    /// Empirical placement factor applied to the rim offset.
    /// Tuned visually; it does not follow from the other measurements.
    pub const RIM_OFFSET_SCALE: f32 = 7.0;
    /// Rim sits this far below the backboard center
    pub const RIM_DROP: f32 = 0.15;
    pub const RIM_RADIAL_SEGMENTS: u32 = 16;
    pub const RIM_TUBULAR_SEGMENTS: u32 = 100;

    pub const NET_SEGMENTS: usize = 8;
    pub const NET_LENGTH: f32 = 0.5;

    pub const BALL_RADIUS: f32 = 0.123;
    pub const BALL_SEGMENTS: u32 = 64;
    /// Gap between the ball's lowest point and the court origin
    pub const BALL_LIFT: f32 = 0.1;
}

/// Direction from a baseline toward center court.
///
/// `+1` for the left half (negative x), `-1` for the right half, `0` at center.
#[inline]
pub fn facing_direction(x_offset: f32) -> f32 {
    if x_offset > 0.0 {
        -1.0
    } else if x_offset < 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Point on a horizontal circle at height `y`
#[inline]
pub fn point_on_circle(center_x: f32, center_z: f32, radius: f32, theta: f32, y: f32) -> Vec3 {
    Vec3::new(
        center_x + radius * theta.cos(),
        y,
        center_z + radius * theta.sin(),
    )
}

/// Mirror a point across the center line (x = 0)
#[inline]
pub fn mirror_x(p: Vec3) -> Vec3 {
    Vec3::new(-p.x, p.y, p.z)
}
