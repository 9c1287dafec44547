//! Off-screen marker indicators.
//!
//! Points are classified against the viewport into a 3×3 grid:
//!
//! ```text
//! 0  1  2
//! 3  4  5
//! 6  7  8
//! ```
//!
//! Region 4 is on screen. Points in the four edge regions are grouped along
//! the edge with the 1-D solver; corner regions are reported as-is.

use crate::{
    core::{
        bounds::{Bounds, Section},
        geo::Point,
    },
    spatial::{cover::Span, interval},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Left = 3,
    Inside = 4,
    Right = 5,
    BottomLeft = 6,
    Bottom = 7,
    BottomRight = 8,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::TopLeft,
        Region::Top,
        Region::TopRight,
        Region::Left,
        Region::Inside,
        Region::Right,
        Region::BottomLeft,
        Region::Bottom,
        Region::BottomRight,
    ];

    /// Edge regions in indicator order
    pub const EDGES: [Region; 4] = [Region::Top, Region::Left, Region::Right, Region::Bottom];

    pub fn from_sections(horizontal: Section, vertical: Section) -> Self {
        Self::ALL[3 * vertical.index() + horizontal.index()]
    }

    pub fn classify(viewport: &Bounds, point: &Point) -> Self {
        if viewport.contains(point) {
            return Region::Inside;
        }
        let (horizontal, vertical) = viewport.classify(point);
        Self::from_sections(horizontal, vertical)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_edge(self) -> bool {
        Self::EDGES.contains(&self)
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Region::TopLeft | Region::TopRight | Region::BottomLeft | Region::BottomRight
        )
    }

    /// Coordinate that runs along an edge region, `None` for other regions
    fn edge_scalar(self, point: &Point) -> Option<f64> {
        match self {
            Region::Top | Region::Bottom => Some(point.x),
            Region::Left | Region::Right => Some(point.y),
            _ => None,
        }
    }
}

/// One indicator group along a viewport edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCover {
    pub region: Region,
    /// Indexes into the solver input, ordered along the edge
    pub indexes: Vec<usize>,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistantSolution {
    /// Input indexes per region, ascending
    pub regions: [Vec<usize>; 9],
    /// Top, then left, right and bottom groups
    pub edges: Vec<EdgeCover>,
}

impl DistantSolution {
    pub fn region(&self, region: Region) -> &[usize] {
        &self.regions[region.index()]
    }

    pub fn edges_in(&self, region: Region) -> impl Iterator<Item = &EdgeCover> {
        self.edges.iter().filter(move |e| e.region == region)
    }

    pub fn off_screen_count(&self) -> usize {
        self.regions
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != Region::Inside.index())
            .map(|(_, r)| r.len())
            .sum()
    }
}

/// Classifies `points` against `viewport` and groups each edge region
pub fn solve(points: &[Point], viewport: &Bounds, merge_distance: f64) -> DistantSolution {
    let mut solution = DistantSolution::default();
    for (index, point) in points.iter().enumerate() {
        let region = Region::classify(viewport, point);
        solution.regions[region.index()].push(index);
    }

    for region in Region::EDGES {
        let indexes = &solution.regions[region.index()];
        let scalars: Vec<f64> = indexes
            .iter()
            .filter_map(|&i| region.edge_scalar(&points[i]))
            .collect();
        for group in interval::solve(&scalars, merge_distance) {
            solution.edges.push(EdgeCover {
                region,
                indexes: group.indexes.iter().map(|&local| indexes[local]).collect(),
                span: group.span,
            });
        }
    }

    log::debug!(
        "distant indicators: {} off-screen points in {} edge groups",
        solution.off_screen_count(),
        solution.edges.len()
    );
    solution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_edge_group() {
        let viewport = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
        let points = [Point::new(150.0, 50.0), Point::new(160.0, 52.0)];
        let solution = solve(&points, &viewport, 20.0);
        assert_eq!(solution.region(Region::Right), &[0, 1]);
        assert_eq!(solution.edges.len(), 1);
        let edge = &solution.edges[0];
        assert_eq!(edge.region, Region::Right);
        assert_eq!(edge.indexes, vec![0, 1]);
        assert!((edge.span.center - 51.0).abs() < 1e-12);
        assert!((edge.span.half_width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_nine_regions() {
        let viewport = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let points: Vec<Point> = [-5.0, 5.0, 15.0]
            .iter()
            .flat_map(|&y| [-5.0, 5.0, 15.0].map(|x| Point::new(x, y)))
            .collect();
        let solution = solve(&points, &viewport, 1.0);
        for region in Region::ALL {
            assert_eq!(solution.region(region), &[region.index()]);
        }
        assert_eq!(solution.edges.len(), 4);
        let order: Vec<Region> = solution.edges.iter().map(|e| e.region).collect();
        assert_eq!(order, Region::EDGES.to_vec());
        assert_eq!(solution.off_screen_count(), 8);
    }

    #[test]
    fn test_viewport_border_counts_as_inside() {
        let viewport = Bounds::from_rect(0.0, 0.0, 10.0, 10.0);
        let points = [Point::new(0.0, 10.0), Point::new(10.0, 0.0)];
        let solution = solve(&points, &viewport, 1.0);
        assert_eq!(solution.region(Region::Inside), &[0, 1]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn test_top_edge_groups_by_x() {
        let viewport = Bounds::from_rect(0.0, 0.0, 100.0, 100.0);
        let points = [
            Point::new(10.0, -50.0),
            Point::new(80.0, -5.0),
            Point::new(12.0, -300.0),
        ];
        let solution = solve(&points, &viewport, 5.0);
        let top: Vec<&EdgeCover> = solution.edges_in(Region::Top).collect();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].indexes, vec![0, 2]);
        assert_eq!(top[1].indexes, vec![1]);
        assert!(Region::Top.is_edge() && !Region::Top.is_corner());
        assert!(Region::TopLeft.is_corner());
    }
}
