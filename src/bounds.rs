use glam::DVec3;

/// Axis-aligned bounding box over world-space points.
///
/// Computed fresh per asset and never mutated afterwards; `min[i] <= max[i]`
/// holds on every axis by construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    /// Fold an iterator of points into their enclosing box. `None` when the
    /// iterator is empty.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bb.min = bb.min.min(p);
            bb.max = bb.max.max(p);
        }
        Some(bb)
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Per-axis extent.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f64 {
        self.size().max_element()
    }
}
