use std::cmp::Ordering;

use serde::Serialize;

use crate::value::FixedPoint;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonResult {
    Equal,
    Less,
    Greater,
    /// The operands have no common numeric meaning.
    Unordered,
}

impl ComparisonResult {
    /// Result with the operands swapped.
    pub fn reverse(self) -> Self {
        match self {
            ComparisonResult::Less => ComparisonResult::Greater,
            ComparisonResult::Greater => ComparisonResult::Less,
            other => other,
        }
    }

    pub fn to_ordering(self) -> Option<Ordering> {
        match self {
            ComparisonResult::Equal => Some(Ordering::Equal),
            ComparisonResult::Less => Some(Ordering::Less),
            ComparisonResult::Greater => Some(Ordering::Greater),
            ComparisonResult::Unordered => None,
        }
    }
}

impl From<Ordering> for ComparisonResult {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Equal => ComparisonResult::Equal,
            Ordering::Less => ComparisonResult::Less,
            Ordering::Greater => ComparisonResult::Greater,
        }
    }
}

impl FixedPoint {
    /// Numeric comparison across scales and signedness, done on both raw
    /// values brought to the finer scale without narrowing. A placeholder
    /// only compares with another placeholder.
    pub fn compare(&self, other: &Self) -> ComparisonResult {
        if self.is_placeholder() != other.is_placeholder() {
            return ComparisonResult::Unordered;
        }
        let scale = i32::from(self.semantics().scale().max(other.semantics().scale()));
        self.raw_at_scale(scale)
            .cmp(&other.raw_at_scale(scale))
            .into()
    }

    pub fn numerically_eq(&self, other: &Self) -> bool {
        self.compare(other) == ComparisonResult::Equal
    }
}
