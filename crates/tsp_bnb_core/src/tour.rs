use std::fmt;

use crate::TspPoint;

/// Result tour: points in visitation order plus the closed-cycle length.
#[derive(Debug)]
pub struct Tour {
    points: Vec<TspPoint>,
    length: u64,
}

impl Tour {
    pub(crate) fn new(points: Vec<TspPoint>, length: u64) -> Self {
        Self { points, length }
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn points(&self) -> &[TspPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{point}")?;
        }
        write!(f, " }}")
    }
}
