//! Hand landmark model produced by the detection backend.

/// A single landmark in normalized image space: x and y in [0, 1] with y
/// growing downward, z an optional relative depth (0 when the backend
/// does not provide it).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Which hand the detection backend believes this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// The landmark subset the control mapping consumes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandLandmarks {
    pub wrist: Landmark,
    pub thumb_tip: Landmark,
    pub index_tip: Landmark,
    pub middle_tip: Landmark,
    pub pinky_tip: Landmark,
    /// MCP joint at the base of the middle finger.
    pub middle_mcp: Landmark,
}

impl HandLandmarks {
    /// Average fingertip-to-wrist distance normalized into [0, 1]:
    /// roughly 0.15 is a closed fist, 0.4 an open palm.
    pub fn openness(&self) -> f32 {
        let tips = [
            &self.index_tip,
            &self.middle_tip,
            &self.thumb_tip,
            &self.pinky_tip,
        ];
        let total: f32 = tips.iter().map(|tip| tip.distance(&self.wrist)).sum();
        let average = total / tips.len() as f32;
        ((average - 0.15) / 0.25).clamp(0.0, 1.0)
    }

    /// Fingers pointing down (image y grows downward) reads as the
    /// reverse gesture.
    pub fn is_reversing(&self) -> bool {
        self.middle_tip.y - self.wrist.y > 0.08
    }
}

/// One hand as reported by a single detection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedHand {
    pub landmarks: HandLandmarks,
    pub handedness: Handedness,
}
