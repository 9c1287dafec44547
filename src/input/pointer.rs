use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identity of an input pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PointerId {
    /// The (single) mouse cursor
    Mouse,
    /// A touch contact, keyed by the platform's touch identifier
    Touch(u64),
    /// A pen or stylus, keyed by the platform's pointer identifier
    Pen(u64),
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerId::Mouse => write!(f, "mouse"),
            PointerId::Touch(id) => write!(f, "touch#{}", id),
            PointerId::Pen(id) => write!(f, "pen#{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PointerId::Mouse.to_string(), "mouse");
        assert_eq!(PointerId::Touch(7).to_string(), "touch#7");
        assert_ne!(PointerId::Touch(1), PointerId::Pen(1));
    }
}
