//! Collision detection
//!
//! Grid games collide on integer cell equality. The shooter collides
//! centered axis-aligned boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::GridPos;

/// A centered axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Square box of side `side`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    /// Strict overlap: boxes that only touch at an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = (self.size + other.size) / 2.0;
        d.x < reach.x && d.y < reach.y
    }
}

/// Index of the first cell in `cells` equal to `pos`
pub fn cell_hit<'a, I>(pos: GridPos, cells: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a GridPos>,
{
    cells.into_iter().position(|c| *c == pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes() {
        let bullet = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(4.0, 12.0));
        let letter = Aabb::square(Vec2::new(110.0, 105.0), 28.0);
        assert!(bullet.overlaps(&letter));
        assert!(letter.overlaps(&bullet));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        // Half widths 2 + 14 = 16
        let bullet = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(4.0, 12.0));
        let letter = Aabb::square(Vec2::new(116.0, 100.0), 28.0);
        assert!(!bullet.overlaps(&letter));
        let letter = Aabb::square(Vec2::new(115.9, 100.0), 28.0);
        assert!(bullet.overlaps(&letter));
    }

    #[test]
    fn separated_on_one_axis_is_a_miss() {
        let a = Aabb::square(Vec2::new(0.0, 0.0), 10.0);
        let b = Aabb::square(Vec2::new(5.0, 50.0), 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn grid_hit_is_integer_equality() {
        let cells = [GridPos::new(1, 1), GridPos::new(4, 2), GridPos::new(4, 3)];
        assert_eq!(cell_hit(GridPos::new(4, 2), &cells), Some(1));
        assert_eq!(cell_hit(GridPos::new(2, 4), &cells), None);
    }
}
