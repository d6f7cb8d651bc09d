use crate::util::Vec3D;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangular footprint in planning space (metres, x east, y north).
///
/// Obstacles have no height; any altitude above the footprint counts as inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Geometry to test against an [`ObstacleMap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    Point(Vec3D<f64>),
    Segment(Vec3D<f64>, Vec3D<f64>),
}

impl Obstacle {
    /// Creates an obstacle from its lower-left corner and extent. Negative extents are
    /// normalised so the stored corner is always the minimum one.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.min(x + width),
            y: y.min(y + height),
            width: width.abs(),
            height: height.abs(),
        }
    }

    pub fn x(&self) -> f64 { self.x }
    pub fn y(&self) -> f64 { self.y }
    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }

    pub fn contains(&self, point: Vec3D<f64>) -> bool {
        (self.x..=self.x + self.width).contains(&point.x())
            && (self.y..=self.y + self.height).contains(&point.y())
    }

    /// Liang-Barsky clip of the horizontal projection of `a -> b` against the footprint.
    /// Touching an edge counts as a hit.
    pub fn intersects_segment(&self, a: Vec3D<f64>, b: Vec3D<f64>) -> bool {
        let dx = b.x() - a.x();
        let dy = b.y() - a.y();
        let mut t_enter: f64 = 0.0;
        let mut t_exit: f64 = 1.0;
        let edges = [
            (-dx, a.x() - self.x),
            (dx, self.x + self.width - a.x()),
            (-dy, a.y() - self.y),
            (dy, self.y + self.height - a.y()),
        ];
        for (p, q) in edges {
            if p.abs() < f64::EPSILON {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t_exit {
                    return false;
                }
                t_enter = t_enter.max(r);
            } else {
                if r < t_enter {
                    return false;
                }
                t_exit = t_exit.min(r);
            }
        }
        t_enter <= t_exit
    }
}

/// The static obstacle set of a session. Read-only once constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleMap {
    obstacles: Vec<Obstacle>,
}

impl ObstacleMap {
    pub fn new(obstacles: Vec<Obstacle>) -> Self { Self { obstacles } }

    pub fn empty() -> Self { Self::default() }

    /// The four city blocks west of the home point.
    pub fn city_block() -> Self {
        Self::new(vec![
            Obstacle::new(-150.0, -70.0, 30.0, 80.0),
            Obstacle::new(-90.0, -30.0, 40.0, 100.0),
            Obstacle::new(-175.0, 50.0, 35.0, 60.0),
            Obstacle::new(-50.0, -100.0, 25.0, 120.0),
        ])
    }

    /// All obstacles in construction order.
    pub fn all(&self) -> &[Obstacle] { &self.obstacles }

    pub fn len(&self) -> usize { self.obstacles.len() }

    pub fn is_empty(&self) -> bool { self.obstacles.is_empty() }

    pub fn intersects(&self, probe: Probe) -> bool {
        match probe {
            Probe::Point(point) => self.obstacles.iter().any(|obs| obs.contains(point)),
            Probe::Segment(a, b) => self.obstacles.iter().any(|obs| obs.intersects_segment(a, b)),
        }
    }

    /// Checks that no leg of the polyline crosses an obstacle footprint.
    pub fn is_clear(&self, path: &[Vec3D<f64>]) -> bool {
        match path {
            [] => true,
            [single] => !self.intersects(Probe::Point(*single)),
            _ => path.iter().tuple_windows().all(|(a, b)| !self.intersects(Probe::Segment(*a, *b))),
        }
    }
}
