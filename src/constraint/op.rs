use std::fmt;

/// Comparison used by a [`super::ClockConstraint`] singleton or diagonal bound.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ComparisonOp {
    Ge,
    Gt,
    Le,
    Lt,
}

impl ComparisonOp {
    /// Apply the comparison to a pair of real-valued clock readings.
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ComparisonOp::Ge => lhs >= rhs,
            ComparisonOp::Gt => lhs > rhs,
            ComparisonOp::Le => lhs <= rhs,
            ComparisonOp::Lt => lhs < rhs,
        }
    }

    /// Whether this comparison constrains a clock from below (`>=`, `>`).
    pub fn is_lower_bound(self) -> bool {
        matches!(self, ComparisonOp::Ge | ComparisonOp::Gt)
    }

    pub fn is_strict(self) -> bool {
        matches!(self, ComparisonOp::Gt | ComparisonOp::Lt)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonOp::Ge => ">=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Le => "<=",
            ComparisonOp::Lt => "<",
        };
        write!(f, "{s}")
    }
}
