use anyhow::{bail, Result};
use std::fmt;

/// Direction a threshold table is scanned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `>=N` / `>N`: best results are the highest numbers.
    Descending,
    /// `<=N` / `<N`: best results are the lowest numbers.
    Ascending,
}

/// A single comparison against a cut point, e.g. `>=90` or `<=1.75`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtLeast(f64),
    Above(f64),
    AtMost(f64),
    Below(f64),
}

impl Bound {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(Bound::AtLeast(parse_cut(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(Bound::AtMost(parse_cut(val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(Bound::Above(parse_cut(val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(Bound::Below(parse_cut(val)?))
        } else {
            bail!("Threshold must start with >=, >, <= or <: {}", s)
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            Bound::AtLeast(n) => value >= *n,
            Bound::Above(n) => value > *n,
            Bound::AtMost(n) => value <= *n,
            Bound::Below(n) => value < *n,
        }
    }

    pub fn cut(&self) -> f64 {
        match self {
            Bound::AtLeast(n) | Bound::Above(n) | Bound::AtMost(n) | Bound::Below(n) => *n,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Bound::AtLeast(_) | Bound::Above(_) => Direction::Descending,
            Bound::AtMost(_) | Bound::Below(_) => Direction::Ascending,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::AtLeast(n) => write!(f, ">={}", n),
            Bound::Above(n) => write!(f, ">{}", n),
            Bound::AtMost(n) => write!(f, "<={}", n),
            Bound::Below(n) => write!(f, "<{}", n),
        }
    }
}

fn parse_cut(s: &str) -> Result<f64> {
    let cut: f64 = s.trim().parse()?;
    if !cut.is_finite() {
        bail!("Threshold must be a finite number: {}", s.trim());
    }
    Ok(cut)
}

/// Find the first `(bound, item)` pair whose bound accepts `value`.
///
/// Returns the index of the match alongside the item so callers can derive
/// an ordinal from table position.
pub(crate) fn first_match<T>(value: f64, steps: &[(Bound, T)]) -> Option<(usize, &T)> {
    steps
        .iter()
        .enumerate()
        .find(|(_, (bound, _))| bound.matches(value))
        .map(|(idx, (_, item))| (idx, item))
}

/// Check that a list of bounds can be scanned as one ordered table: every
/// bound faces the same way and cut points move strictly away from the best
/// end of the scale. Returns one message per problem.
pub(crate) fn check_order(bounds: &[Bound]) -> Vec<String> {
    let mut errors = Vec::new();
    let Some(first) = bounds.first() else {
        return errors;
    };
    let direction = first.direction();

    for (i, pair) in bounds.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        if next.direction() != direction {
            errors.push(format!(
                "[{}] '{}' mixes >= and <= thresholds in one table",
                i + 1,
                next
            ));
            continue;
        }
        let ordered = match direction {
            Direction::Descending => next.cut() < prev.cut(),
            Direction::Ascending => next.cut() > prev.cut(),
        };
        if !ordered {
            errors.push(format!(
                "[{}] '{}' is unreachable after '{}'",
                i + 1,
                next,
                prev
            ));
        }
    }
    errors
}
