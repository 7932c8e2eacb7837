//! Depth comparators
//!
//! The depth test is the single gate for a pixel write; callers pick the
//! comparator per draw call, there is no implicit default in the buffer.

/// Comparison applied between an incoming depth and the stored depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    Always,
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
}

impl DepthFunc {
    /// True iff a write with depth `input_z` passes against `stored_z`.
    pub fn compare(self, input_z: f64, stored_z: f64) -> bool {
        match self {
            DepthFunc::Always => true,
            DepthFunc::Never => false,
            DepthFunc::Less => input_z < stored_z,
            DepthFunc::Equal => input_z == stored_z,
            DepthFunc::LessEqual => input_z <= stored_z,
            DepthFunc::Greater => input_z > stored_z,
            DepthFunc::NotEqual => input_z != stored_z,
            DepthFunc::GreaterEqual => input_z >= stored_z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparators_match_their_operators() {
        assert!(DepthFunc::Always.compare(1.0, -1.0));
        assert!(!DepthFunc::Never.compare(-1.0, 1.0));

        assert!(DepthFunc::Less.compare(0.2, 0.5));
        assert!(!DepthFunc::Less.compare(0.5, 0.5));

        assert!(DepthFunc::LessEqual.compare(0.5, 0.5));
        assert!(!DepthFunc::LessEqual.compare(0.6, 0.5));

        assert!(DepthFunc::Equal.compare(0.5, 0.5));
        assert!(!DepthFunc::Equal.compare(0.4, 0.5));

        assert!(DepthFunc::NotEqual.compare(0.4, 0.5));
        assert!(!DepthFunc::NotEqual.compare(0.5, 0.5));

        assert!(DepthFunc::Greater.compare(0.7, 0.5));
        assert!(!DepthFunc::Greater.compare(0.5, 0.5));

        assert!(DepthFunc::GreaterEqual.compare(0.5, 0.5));
        assert!(!DepthFunc::GreaterEqual.compare(0.4, 0.5));
    }
}
