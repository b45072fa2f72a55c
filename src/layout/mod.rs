//! Procedural court layout
//!
//! Pure and deterministic: every builder is a function of the constants in
//! `crate::consts` and returns values. Nothing here touches the scene graph,
//! the GPU or the DOM; `CourtLayout::register` hands the result to a sink.

pub mod arc;
pub mod assembly;
pub mod ball;
pub mod court;
pub mod hoop;
pub mod primitive;

pub use arc::{ArcCurve, ArcPoints};
pub use assembly::CourtLayout;
pub use ball::build_ball;
pub use court::{
    ThreePointLine, build_center_markings, build_court_slab, build_three_point_line,
    three_point_angle,
};
pub use hoop::{Hoop, build_hoop, rim_offset};
pub use primitive::{Placement, Primitive, Shape};
