//! Selection combinators built on the numeric generators.

use crate::generators::IntervalGenerator;
use crate::registry::generator;

use rand::Rng;
use std::fmt;

/// Misuse of a selection combinator.
///
/// These signal a broken test rather than a falsified property. Inside a
/// predicate, unwrapping one turns it into a fault, which ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorError {
    /// Nothing to choose from.
    EmptySelection,
    /// The selection scan ran off the end without picking anything.
    SelectionExhausted,
}

impl fmt::Display for CombinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinatorError::EmptySelection => write!(f, "Cannot choose from an empty selection"),
            CombinatorError::SelectionExhausted => write!(f, "Failed to pick something"),
        }
    }
}

impl std::error::Error for CombinatorError {}

/// Pick one element uniformly at random.
///
/// Works on anything with an exact length: slices, vectors, and the integer
/// ranges the standard library sizes exactly (`0..10`, `b'a'..=b'z'`).
pub fn oneof<R, I>(rng: &mut R, xs: I) -> Result<I::Item, CombinatorError>
where
    R: Rng + ?Sized,
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    let mut xs = xs.into_iter();
    let len = xs.len();
    if len == 0 {
        return Err(CombinatorError::EmptySelection);
    }

    let index = generator::<usize>().generate_in(rng, 0, len - 1);
    xs.nth(index).ok_or(CombinatorError::SelectionExhausted)
}

/// Pick a value with probability proportional to its weight.
///
/// When every weight is zero the first entry is returned.
pub fn frequency<R, T>(rng: &mut R, xs: &[(u32, T)]) -> Result<T, CombinatorError>
where
    R: Rng + ?Sized,
    T: Clone,
{
    if xs.is_empty() {
        return Err(CombinatorError::EmptySelection);
    }

    let total: u64 = xs.iter().map(|(weight, _)| u64::from(*weight)).sum();
    if total == 0 {
        return Ok(xs[0].1.clone());
    }

    let n = generator::<u64>().generate_in(rng, 1, total);
    let mut running = 0u64;
    for (weight, value) in xs {
        running += u64::from(*weight);
        if running >= n {
            return Ok(value.clone());
        }
    }

    Err(CombinatorError::SelectionExhausted)
}
