use crate::{
    core::geo::Point,
    spatial::{
        cover::{Circle, Cover},
        enclosing::{EnclosingCircle, Welzl},
        union_find::UnionFind,
    },
    MapError, Result,
};
use rstar::{primitives::GeomWithData, RTree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// How a cover's circle is derived from its member points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverMethod {
    /// Centre of the bounding box
    Simple,
    /// Arithmetic mean of the members
    Mean,
    /// Per-axis median of the members
    Median,
    /// Minimal enclosing circle; needs an injected [`EnclosingCircle`]
    Smallest,
}

impl CoverMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            CoverMethod::Simple => "simple",
            CoverMethod::Mean => "mean",
            CoverMethod::Median => "median",
            CoverMethod::Smallest => "smallest",
        }
    }
}

impl fmt::Display for CoverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverMethod {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simple" => Ok(CoverMethod::Simple),
            "mean" => Ok(CoverMethod::Mean),
            "median" => Ok(CoverMethod::Median),
            "smallest" => Ok(CoverMethod::Smallest),
            other => Err(MapError::InvalidArgument(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Covers are never drawn smaller than this diameter
    pub minimum_cover_diameter: f64,
    pub cover_method: CoverMethod,
    /// Repeatedly merge covers whose circles overlap
    pub merge_overlaps: bool,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            minimum_cover_diameter: 0.0,
            cover_method: CoverMethod::Simple,
            merge_overlaps: true,
        }
    }
}

/// Output of a clustering pass: a partition of the input indexes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSolution {
    /// Indexes not absorbed by any cover, ascending
    pub remains: Vec<usize>,
    pub covers: Vec<Cover>,
}

impl ClusterSolution {
    /// Centres of everything the host draws: remaining points, then cover circles
    pub fn marker_centers(&self, points: &[Point]) -> Vec<Point> {
        self.remains
            .iter()
            .map(|&i| points[i])
            .chain(self.covers.iter().map(|c| c.circle.center))
            .collect()
    }
}

/// Groups nearby points into enclosing cover circles.
///
/// Each `solve` call is pure: it yields a fresh set of covers. Hosts that
/// animate between passes can match covers by member set
/// ([`Cover::same_members`]).
#[derive(Default)]
pub struct ClusterSolver {
    enclosing: Option<Box<dyn EnclosingCircle>>,
}

impl fmt::Debug for ClusterSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterSolver")
            .field("enclosing", &self.enclosing.as_ref().map(|e| e.name()))
            .finish()
    }
}

impl ClusterSolver {
    /// Solver without a `smallest` strategy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing_circle<E>(strategy: E) -> Self
    where
        E: EnclosingCircle + 'static,
    {
        Self {
            enclosing: Some(Box::new(strategy)),
        }
    }

    pub fn with_welzl() -> Self {
        Self::with_enclosing_circle(Welzl)
    }

    pub fn supports(&self, method: CoverMethod) -> bool {
        method != CoverMethod::Smallest || self.enclosing.is_some()
    }

    /// Clusters `points` whose pairwise distance is below `merge_distance`.
    ///
    /// Fails before doing any work when `options.cover_method` is not
    /// available on this solver.
    pub fn solve(
        &self,
        points: &[Point],
        merge_distance: f64,
        options: &ClusterOptions,
    ) -> Result<ClusterSolution> {
        if !self.supports(options.cover_method) {
            return Err(MapError::InvalidArgument(options.cover_method.to_string()));
        }

        let mut components = UnionFind::new(points.len());
        for (i, j) in close_pairs(points, merge_distance) {
            components.union(i, j);
        }

        let floor = (options.minimum_cover_diameter / 2.0).max(0.0);
        let mut covers: Vec<Cover> = components
            .groups()
            .into_iter()
            .map(|indexes| self.build_cover(points, indexes, options.cover_method, floor))
            .collect();

        if options.merge_overlaps {
            while let Some((i, j)) = first_overlap(&covers) {
                let absorbed = covers.remove(j);
                log::trace!(
                    "merging cover {:?} into {:?}",
                    absorbed.indexes,
                    covers[i].indexes
                );
                let mut indexes = std::mem::take(&mut covers[i].indexes);
                indexes.extend(absorbed.indexes);
                indexes.sort_unstable();
                covers[i] = self.build_cover(points, indexes, options.cover_method, floor);
            }
        }

        let mut claimed = vec![false; points.len()];
        for cover in &covers {
            for &i in &cover.indexes {
                claimed[i] = true;
            }
        }
        let remains: Vec<usize> = (0..points.len()).filter(|&i| !claimed[i]).collect();

        log::debug!(
            "clustered {} points into {} covers ({} remain, method {})",
            points.len(),
            covers.len(),
            remains.len(),
            options.cover_method
        );

        Ok(ClusterSolution { remains, covers })
    }

    fn build_cover(
        &self,
        points: &[Point],
        indexes: Vec<usize>,
        method: CoverMethod,
        floor: f64,
    ) -> Cover {
        let members: Vec<Point> = indexes.iter().map(|&i| points[i]).collect();
        let mut circle = self.summarize(&members, method);
        circle.radius = circle.radius.max(floor);
        Cover { indexes, circle }
    }

    fn summarize(&self, members: &[Point], method: CoverMethod) -> Circle {
        let center = match method {
            CoverMethod::Simple => {
                let (mut min, mut max) = (members[0], members[0]);
                for p in &members[1..] {
                    min = Point::new(min.x.min(p.x), min.y.min(p.y));
                    max = Point::new(max.x.max(p.x), max.y.max(p.y));
                }
                min.midpoint(&max)
            }
            CoverMethod::Mean => {
                let sum = members.iter().fold(Point::zero(), |acc, p| acc.add(p));
                sum.multiply(1.0 / members.len() as f64)
            }
            CoverMethod::Median => Point::new(
                median(members.iter().map(|p| p.x).collect()),
                median(members.iter().map(|p| p.y).collect()),
            ),
            CoverMethod::Smallest => {
                if let Some(strategy) = &self.enclosing {
                    return strategy.enclose(members);
                }
                // unreachable through `solve`, which checks support up front
                return Circle::new(members[0], 0.0);
            }
        };
        let radius = members
            .iter()
            .map(|p| p.distance_to(&center))
            .fold(0.0, f64::max);
        Circle::new(center, radius)
    }
}

/// Clusters with a solver that offers every cover method
pub fn solve(points: &[Point], merge_distance: f64, options: &ClusterOptions) -> Result<ClusterSolution> {
    ClusterSolver::with_welzl().solve(points, merge_distance, options)
}

/// All `(i, j)` with `i < j` whose distance is strictly below `merge_distance`
fn close_pairs(points: &[Point], merge_distance: f64) -> Vec<(usize, usize)> {
    if merge_distance.is_nan() || merge_distance <= 0.0 {
        return Vec::new();
    }
    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(i, p)| IndexedPoint::new(p.to_array(), i))
            .collect(),
    );
    let radius_2 = merge_distance * merge_distance;
    let mut pairs = Vec::new();
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            continue;
        }
        for neighbor in tree.locate_within_distance(p.to_array(), radius_2) {
            let j = neighbor.data;
            if j > i && p.distance_to(&points[j]) < merge_distance {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Lowest-indexed overlapping pair, scanning `(0,1), (0,2), .., (1,2), ..`
fn first_overlap(covers: &[Cover]) -> Option<(usize, usize)> {
    for i in 0..covers.len() {
        for j in (i + 1)..covers.len() {
            if covers[i].circle.overlaps(&covers[j].circle) {
                return Some((i, j));
            }
        }
    }
    None
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let middle = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[middle - 1] + values[middle]) / 2.0
    } else {
        values[middle]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_pair_within_distance_forms_cover() {
        let points = pts(&[(0.0, 0.0), (5.0, 0.0), (100.0, 100.0)]);
        let solution = ClusterSolver::new()
            .solve(&points, 10.0, &ClusterOptions::default())
            .unwrap();
        assert_eq!(solution.remains, vec![2]);
        assert_eq!(solution.covers.len(), 1);
        let cover = &solution.covers[0];
        assert_eq!(cover.indexes, vec![0, 1]);
        assert_eq!(cover.circle.center, Point::new(2.5, 0.0));
        assert!(cover.circle.radius >= 2.5);
    }

    #[test]
    fn test_distance_threshold_is_strict() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let solution = solve(&points, 10.0, &ClusterOptions::default()).unwrap();
        assert!(solution.covers.is_empty());
        assert_eq!(solution.remains, vec![0, 1]);
    }

    #[test]
    fn test_chain_connects_transitively() {
        let points = pts(&[(0.0, 0.0), (8.0, 0.0), (16.0, 0.0), (24.0, 0.0)]);
        let solution = solve(&points, 10.0, &ClusterOptions::default()).unwrap();
        assert_eq!(solution.covers.len(), 1);
        assert_eq!(solution.covers[0].indexes, vec![0, 1, 2, 3]);
        assert_eq!(solution.covers[0].circle.radius, 12.0);
    }

    #[test]
    fn test_mean_and_median_centers() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (9.0, 0.0)]);
        let mean = ClusterOptions {
            cover_method: CoverMethod::Mean,
            ..Default::default()
        };
        let circle = solve(&points, 10.0, &mean).unwrap().covers[0].circle;
        assert!((circle.center.x - 10.0 / 3.0).abs() < 1e-12);
        assert!((circle.radius - (9.0 - 10.0 / 3.0)).abs() < 1e-12);

        let median = ClusterOptions {
            cover_method: CoverMethod::Median,
            ..Default::default()
        };
        let circle = solve(&points, 10.0, &median).unwrap().covers[0].circle;
        assert_eq!(circle.center, Point::new(1.0, 0.0));
        assert_eq!(circle.radius, 8.0);
    }

    #[test]
    fn test_even_median_averages_middle_values() {
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(vec![7.0]), 7.0);
    }

    #[test]
    fn test_minimum_cover_diameter_floors_radius() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0)]);
        let options = ClusterOptions {
            minimum_cover_diameter: 30.0,
            ..Default::default()
        };
        let solution = solve(&points, 10.0, &options).unwrap();
        assert_eq!(solution.covers[0].circle.radius, 15.0);
    }

    #[test]
    fn test_overlapping_covers_merge() {
        // two tight pairs whose floored circles overlap
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (12.0, 0.0), (13.0, 0.0)]);
        let options = ClusterOptions {
            minimum_cover_diameter: 14.0,
            ..Default::default()
        };
        let merged = solve(&points, 5.0, &options).unwrap();
        assert_eq!(merged.covers.len(), 1);
        assert_eq!(merged.covers[0].indexes, vec![0, 1, 2, 3]);
        assert_eq!(merged.covers[0].circle.center, Point::new(6.5, 0.0));

        let separate = solve(
            &points,
            5.0,
            &ClusterOptions {
                merge_overlaps: false,
                ..options
            },
        )
        .unwrap();
        assert_eq!(separate.covers.len(), 2);
    }

    #[test]
    fn test_smallest_requires_strategy() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        let options = ClusterOptions {
            cover_method: CoverMethod::Smallest,
            ..Default::default()
        };
        let err = ClusterSolver::new().solve(&points, 5.0, &options).unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: smallest");

        let solution = ClusterSolver::with_welzl().solve(&points, 5.0, &options).unwrap();
        assert_eq!(solution.covers[0].circle.radius, 0.5);
    }

    #[test]
    fn test_cover_method_parsing() {
        assert_eq!("median".parse::<CoverMethod>().unwrap(), CoverMethod::Median);
        let err = "biggest".parse::<CoverMethod>().unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: biggest");
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        let solution = solve(&[], 10.0, &ClusterOptions::default()).unwrap();
        assert_eq!(solution, ClusterSolution::default());

        let points = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        let solution = solve(&points, 0.0, &ClusterOptions::default()).unwrap();
        assert_eq!(solution.remains, vec![0, 1]);

        let points = pts(&[(f64::NAN, 0.0), (0.0, 0.0), (0.5, 0.0)]);
        let solution = solve(&points, 1.0, &ClusterOptions::default()).unwrap();
        assert_eq!(solution.remains, vec![0]);
        assert_eq!(solution.covers[0].indexes, vec![1, 2]);
    }

    #[test]
    fn test_marker_centers() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (50.0, 50.0)]);
        let solution = solve(&points, 5.0, &ClusterOptions::default()).unwrap();
        assert_eq!(
            solution.marker_centers(&points),
            vec![Point::new(50.0, 50.0), Point::new(1.0, 0.0)]
        );
    }
}
