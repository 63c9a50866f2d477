//! Open polylines, shared by the path and freehand-path kinds.

use cutkit_core::Point;

/// Distance from `p` to the segment between `a` and `b`.
pub(crate) fn segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        return a.distance_to(p);
    }
    let t = (((p.x - a.x) * vx + (p.y - a.y) * vy) / len_sq).clamp(0.0, 1.0);
    let nearest = Point::new(a.x + t * vx, a.y + t * vy);
    nearest.distance_to(p)
}

/// An open polyline through an ordered list of vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathShape {
    points: Vec<Point>,
}

impl PathShape {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn set_point(&mut self, index: usize, p: Point) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = p;
        }
    }

    /// Arithmetic mean of the vertices; the origin for an empty path.
    pub fn centroid(&self) -> Point {
        if self.points.is_empty() {
            return Point::new(0.0, 0.0);
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }

    pub fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        self.points
            .windows(2)
            .any(|w| segment_distance(p, &w[0], &w[1]) <= tolerance)
    }

    /// Index and distance of the vertex nearest to `p`.
    pub fn nearest_vertex(&self, p: &Point) -> Option<(usize, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.distance_to(p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Index and distance of the segment nearest to `p`, where segment `i`
    /// runs from vertex `i` to vertex `i + 1`.
    pub fn nearest_segment(&self, p: &Point) -> Option<(usize, f64)> {
        if self.points.len() < 2 {
            return None;
        }
        (0..self.points.len() - 1)
            .map(|i| (i, segment_distance(p, &self.points[i], &self.points[i + 1])))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Splits the nearest segment by inserting `p` as a new vertex.
    pub fn insert_near(&mut self, p: Point) -> bool {
        match self.nearest_segment(&p) {
            Some((i, _)) => {
                self.points.insert(i + 1, p);
                true
            }
            None => false,
        }
    }

    /// Removes the vertex nearest to `p`. Refuses to drop below two
    /// vertices so the path keeps at least one segment.
    pub fn delete_near(&mut self, p: Point) -> bool {
        if self.points.len() <= 2 {
            return false;
        }
        match self.nearest_vertex(&p) {
            Some((i, _)) => {
                self.points.remove(i);
                true
            }
            None => false,
        }
    }
}
