use std::fmt;

/// Input point: caller-supplied label plus integer grid coordinates.
/// Immutable once constructed; the solver indexes points by their position
/// in the input sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TspPoint {
    pub label: String,
    pub x: i64,
    pub y: i64,
}

impl TspPoint {
    pub fn new(label: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}

impl fmt::Display for TspPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
