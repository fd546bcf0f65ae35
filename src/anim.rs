/// Interpolation applied from a key toward the next one.
///
/// `Smooth` is an in/out cubic ease: the move accelerates away from the
/// first anchor and decelerates into the last, which reads as a natural
/// hand-operated camera. `Linear` keeps constant velocity, which a full-turn
/// orbit needs so the seam between the last and first frame is invisible
/// when looped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Interp {
    Linear,
    Smooth,
}

impl Interp {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Key {
    pub frame: u32,
    pub value: f64,
    pub interp: Interp,
}

/// Keyframe curve for one scalar channel. Keys stay sorted by frame and
/// unique per frame: inserting at an existing frame replaces that key.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    keys: Vec<Key>,
}

impl Curve {
    pub fn insert(&mut self, key: Key) {
        match self.keys.binary_search_by_key(&key.frame, |k| k.frame) {
            Ok(idx) => self.keys[idx] = key,
            Err(idx) => self.keys.insert(idx, key),
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Evaluate the curve at `frame`: clamped outside the key range,
    /// interpolated per the left key's mode between keys. `None` when the
    /// curve has no keys.
    pub fn sample(&self, frame: u32) -> Option<f64> {
        if self.keys.is_empty() {
            return None;
        }

        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return Some(self.keys[0].value);
        }
        if idx >= self.keys.len() {
            return Some(self.keys[self.keys.len() - 1].value);
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame - a.frame;
        if denom == 0 {
            return Some(a.value);
        }

        let t = f64::from(frame - a.frame) / f64::from(denom);
        let te = a.interp.apply(t);
        Some(a.value + (b.value - a.value) * te)
    }
}
