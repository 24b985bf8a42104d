pub trait ToAngle {
    fn rad(self) -> Angle;
    fn deg(self) -> Angle;
}

impl ToAngle for f32 {
    fn rad(self) -> Angle {
        Angle::from_rad(self)
    }

    fn deg(self) -> Angle {
        Angle::from_deg(self)
    }
}

/// An angle, stored in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    radians: f32,
}

impl Angle {
    const PI_180: f32 = std::f32::consts::PI / 180.0;

    pub const fn from_rad(radians: f32) -> Self {
        Self { radians }
    }

    pub fn from_deg(degrees: f32) -> Self {
        Self::from_rad(degrees * Self::PI_180)
    }

    pub const fn to_rad(self) -> f32 {
        self.radians
    }

    pub fn to_deg(self) -> f32 {
        self.radians / Self::PI_180
    }
}
