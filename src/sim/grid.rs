//! Grid coordinate space and collision primitives
//!
//! Cells are addressed with `IVec2` in screen orientation: x grows to the
//! right, y grows downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// All headings in enumeration order
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit step for one tick of travel
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -1),
            Heading::Down => IVec2::new(0, 1),
            Heading::Left => IVec2::new(-1, 0),
            Heading::Right => IVec2::new(1, 0),
        }
    }

    pub fn reverse(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// True for a 180 degree turn relative to `other`
    pub fn is_reverse_of(self, other: Heading) -> bool {
        self.reverse() == other
    }

}

/// Arena dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grid covering a pixel surface, one cell per `cell_size` pixels
    pub fn for_surface(surface_width: u32, surface_height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self {
            width: (surface_width / cell) as i32,
            height: (surface_height / cell) as i32,
        }
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        in_bounds(cell, self.width, self.height)
    }

    /// Clamp a cell into the arena
    pub fn clamp(&self, cell: IVec2) -> IVec2 {
        IVec2::new(
            cell.x.clamp(0, (self.width - 1).max(0)),
            cell.y.clamp(0, (self.height - 1).max(0)),
        )
    }

    /// Portrait arenas are taller than they are wide
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// Whether `cell` lies inside a `width` x `height` arena
#[inline]
pub fn in_bounds(cell: IVec2, width: i32, height: i32) -> bool {
    cell.x >= 0 && cell.x < width && cell.y >= 0 && cell.y < height
}

/// Exact membership test against a trail
#[inline]
pub fn occupies(cell: IVec2, trail: &[IVec2]) -> bool {
    trail.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_pairs() {
        for heading in Heading::ALL {
            assert!(heading.reverse().is_reverse_of(heading));
            assert_eq!(heading.reverse().reverse(), heading);
            assert!(!heading.is_reverse_of(heading));
            assert_eq!(heading.delta() + heading.reverse().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_delta_is_unit_axis_step() {
        for heading in Heading::ALL {
            let d = heading.delta();
            assert_eq!(d.x.abs() + d.y.abs(), 1);
        }
        // Screen orientation: up decreases y
        assert_eq!(Heading::Up.delta(), IVec2::new(0, -1));
    }

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(IVec2::new(0, 0), 30, 20));
        assert!(in_bounds(IVec2::new(29, 19), 30, 20));
        assert!(!in_bounds(IVec2::new(30, 5), 30, 20));
        assert!(!in_bounds(IVec2::new(5, 20), 30, 20));
        assert!(!in_bounds(IVec2::new(-1, 0), 30, 20));
        assert!(!in_bounds(IVec2::new(0, -1), 30, 20));
    }

    #[test]
    fn test_occupies() {
        let trail = vec![IVec2::new(1, 1), IVec2::new(2, 1), IVec2::new(3, 1)];
        assert!(occupies(IVec2::new(2, 1), &trail));
        assert!(!occupies(IVec2::new(4, 1), &trail));
        assert!(!occupies(IVec2::new(1, 1), &[]));
    }

    #[test]
    fn test_grid_for_surface() {
        assert_eq!(Grid::for_surface(640, 480, 20), Grid::new(32, 24));
        assert_eq!(Grid::for_surface(480, 720, 20), Grid::new(24, 36));
        assert!(Grid::for_surface(480, 720, 20).is_portrait());
        // Partial cells are dropped
        assert_eq!(Grid::for_surface(655, 479, 20), Grid::new(32, 23));
    }

}
