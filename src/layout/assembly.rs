//! Full court layout: every primitive of the scene in one value

use log::debug;
use serde::{Deserialize, Serialize};

use super::ball::build_ball;
use super::court::{ThreePointLine, build_center_markings, build_court_slab, build_three_point_line};
use super::hoop::{Hoop, build_hoop};
use super::primitive::Primitive;
use crate::consts::COURT_EDGE_X;
use crate::scene::{NodeHandle, SceneSink};

/// Every primitive making up the court, both hoops and the ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtLayout {
    pub court_slab: Primitive,
    pub center_markings: [Primitive; 2],
    /// Left (`-x`) then right (`+x`) baseline
    pub three_point_lines: [ThreePointLine; 2],
    /// Left (`-x`) then right (`+x`) hoop
    pub hoops: [Hoop; 2],
    pub ball: Primitive,
}

impl CourtLayout {
    pub fn build() -> Self {
        let layout = Self {
            court_slab: build_court_slab(),
            center_markings: build_center_markings(),
            three_point_lines: [
                build_three_point_line(-COURT_EDGE_X),
                build_three_point_line(COURT_EDGE_X),
            ],
            hoops: [build_hoop(-COURT_EDGE_X), build_hoop(COURT_EDGE_X)],
            ball: build_ball(),
        };
        debug!("Court layout built: {} primitives", layout.primitive_count());
        layout
    }

    /// All primitives in construction order
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        std::iter::once(&self.court_slab)
            .chain(self.center_markings.iter())
            .chain(self.three_point_lines.iter().flat_map(|l| l.primitives()))
            .chain(self.hoops.iter().flat_map(|h| h.primitives()))
            .chain(std::iter::once(&self.ball))
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives().count()
    }

    /// Register every primitive with the scene, returning handles in order
    pub fn register<S: SceneSink + ?Sized>(&self, sink: &mut S) -> Vec<NodeHandle> {
        self.primitives()
            .map(|p| sink.add_primitive(p.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Shape;

    #[test]
    fn test_layout_is_idempotent() {
        assert_eq!(CourtLayout::build(), CourtLayout::build());
    }

    #[test]
    fn test_primitive_count() {
        // slab + 2 center markings + 2 * 3 three-point + 2 * (4 + 8) hoop + ball
        let layout = CourtLayout::build();
        assert_eq!(layout.primitive_count(), 1 + 2 + 6 + 24 + 1);
    }

    #[test]
    fn test_construction_order() {
        let layout = CourtLayout::build();
        let primitives: Vec<&Primitive> = layout.primitives().collect();
        assert!(matches!(primitives[0].shape, Shape::Box { .. }));
        assert!(matches!(primitives[2].shape, Shape::PolylineLoop { .. }));
        assert!(matches!(
            primitives.last().unwrap().shape,
            Shape::Sphere { .. }
        ));
    }

    #[test]
    fn test_hoops_sit_on_both_baselines() {
        let layout = CourtLayout::build();
        assert_eq!(layout.hoops[0].pole.placement.position.x, -15.0);
        assert_eq!(layout.hoops[1].pole.placement.position.x, 15.0);
    }
}
