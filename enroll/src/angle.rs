use image::Rgb;

/// Which detector pass found a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    Frontal,
    LeftProfile,
    RightProfile,
}

impl Angle {
    pub const ALL: [Angle; 3] = [Angle::Frontal, Angle::LeftProfile, Angle::RightProfile];

    /// Spoken the first time this angle shows up in a session.
    pub fn announcement(self) -> &'static str {
        match self {
            Angle::Frontal => "Frontal face detected.",
            Angle::LeftProfile => "Left profile face detected.",
            Angle::RightProfile => "Right profile face detected.",
        }
    }

    /// Box colour on the preview frame.
    pub fn color(self) -> Rgb<u8> {
        match self {
            Angle::Frontal => Rgb([0, 0, 255]),
            Angle::LeftProfile => Rgb([0, 255, 0]),
            Angle::RightProfile => Rgb([255, 0, 0]),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Angle::Frontal => 1,
            Angle::LeftProfile => 2,
            Angle::RightProfile => 4,
        }
    }
}

/// Angles seen so far in one capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AngleSet(u8);

impl AngleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(self, angle: Angle) -> bool {
        self.0 & angle.bit() != 0
    }

    /// Mark `angle` as seen. Returns `true` if it had not been seen before.
    pub fn insert(&mut self, angle: Angle) -> bool {
        let fresh = !self.contains(angle);
        self.0 |= angle.bit();
        fresh
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Angle> {
        Angle::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}
