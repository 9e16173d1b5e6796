// Body landmarks handed over by the pose source once per analysis tick.

/// Fixed set of body points the posture rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPoint {
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    Nose,
}

/// A single 2D keypoint with the model's confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }
}

/// Landmarks detected in one frame. Points the model did not report are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkSet {
    pub left_shoulder: Option<Landmark>,
    pub right_shoulder: Option<Landmark>,
    pub left_hip: Option<Landmark>,
    pub right_hip: Option<Landmark>,
    pub nose: Option<Landmark>,
}

impl LandmarkSet {
    pub fn get(&self, point: BodyPoint) -> Option<Landmark> {
        match point {
            BodyPoint::LeftShoulder => self.left_shoulder,
            BodyPoint::RightShoulder => self.right_shoulder,
            BodyPoint::LeftHip => self.left_hip,
            BodyPoint::RightHip => self.right_hip,
            BodyPoint::Nose => self.nose,
        }
    }

    pub fn set(&mut self, point: BodyPoint, landmark: Option<Landmark>) {
        let slot = match point {
            BodyPoint::LeftShoulder => &mut self.left_shoulder,
            BodyPoint::RightShoulder => &mut self.right_shoulder,
            BodyPoint::LeftHip => &mut self.left_hip,
            BodyPoint::RightHip => &mut self.right_hip,
            BodyPoint::Nose => &mut self.nose,
        };
        *slot = landmark;
    }

    pub fn with(mut self, point: BodyPoint, landmark: Landmark) -> Self {
        self.set(point, Some(landmark));
        self
    }
}
