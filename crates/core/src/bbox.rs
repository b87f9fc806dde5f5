/// Axis-aligned bounds of the finite positions in a cloud.
///
/// An empty box has `min` at +inf and `max` at -inf on every axis, so
/// growing it is a plain component-wise min/max.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Skips points with a non-finite coordinate.
    pub fn grow(&mut self, point: [f32; 3]) {
        if point.iter().any(|v| !v.is_finite()) {
            return;
        }
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = self.clone();
        for axis in 0..3 {
            out.min[axis] = out.min[axis].min(other.min[axis]);
            out.max[axis] = out.max[axis].max(other.max[axis]);
        }
        out
    }

    pub fn center(&self) -> Option<[f32; 3]> {
        if self.is_empty() {
            return None;
        }
        Some([0, 1, 2].map(|axis| (self.min[axis] + self.max[axis]) * 0.5))
    }

    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.grow(p);
            aabb
        })
    }
}
