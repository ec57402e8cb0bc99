//! Minimizers producing shrink paths for failing inputs.
//!
//! A minimizer turns one value into a finite, fully materialized sequence of
//! candidates. The first candidate is always the input itself, and the
//! generated minimizers end at the canonical minimum of their type (zero, or
//! the empty container). The engine walks these sequences in lock-step, see
//! [`crate::engine`].

use crate::generators::{Container, IntervalGenerator, Integral, Real, UniformIntegral, UniformReal};
use crate::registry::minimizer;

use rand::Rng;
use std::marker::PhantomData;

/// Magnitude below which real values shrink with the gentlest divisors (2^64).
pub const REAL_LOW_BAND_LIMIT: f64 = 18446744073709551616.0;
/// Magnitude below which real values shrink with the middle divisors (2^128).
pub const REAL_MID_BAND_LIMIT: f64 = 340282366920938463463374607431768211456.0;
/// Real shrinking stops once the magnitude is at or below this threshold.
pub const REAL_SHRINK_EPSILON: f64 = 1e-20;

pub trait Minimizer {
    type Value;

    /// Candidate sequence for `x`, beginning with `x` itself.
    fn shrink<R: Rng + ?Sized>(&self, rng: &mut R, x: &Self::Value) -> Vec<Self::Value>;
}

/// No known reduction: the only candidate is the input.
pub struct DefaultMinimizer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for DefaultMinimizer<T> {
    fn default() -> Self {
        DefaultMinimizer { _marker: PhantomData }
    }
}

impl<T: Clone> Minimizer for DefaultMinimizer<T> {
    type Value = T;

    fn shrink<R: Rng + ?Sized>(&self, _rng: &mut R, x: &T) -> Vec<T> {
        vec![x.clone()]
    }
}

/// Shrinks an integer toward zero by repeated division by 2 or 3.
pub struct IntegralMinimizer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for IntegralMinimizer<T> {
    fn default() -> Self {
        IntegralMinimizer { _marker: PhantomData }
    }
}

impl<T: Integral> Minimizer for IntegralMinimizer<T> {
    type Value = T;

    fn shrink<R: Rng + ?Sized>(&self, rng: &mut R, x: &T) -> Vec<T> {
        let divisors = UniformIntegral::<T>::default();

        let mut xs = Vec::new();
        let mut current = *x;
        while current != T::ZERO {
            xs.push(current);
            current = current / divisors.generate_in(rng, T::TWO, T::THREE);
        }
        xs.push(T::ZERO);
        xs
    }
}

/// Divisor interval used for a real value of the given magnitude.
pub fn divisor_band(magnitude: f64) -> (f64, f64) {
    if magnitude < REAL_LOW_BAND_LIMIT {
        (2e1, 3e1)
    } else if magnitude < REAL_MID_BAND_LIMIT {
        (2e10, 2e20)
    } else {
        (2e75, 2e100)
    }
}

/// Shrinks a real toward zero by dividing with magnitude-banded random divisors.
pub struct RealMinimizer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for RealMinimizer<T> {
    fn default() -> Self {
        RealMinimizer { _marker: PhantomData }
    }
}

impl<T: Real> Minimizer for RealMinimizer<T> {
    type Value = T;

    fn shrink<R: Rng + ?Sized>(&self, rng: &mut R, x: &T) -> Vec<T> {
        let mut xs = vec![*x];

        if x.to_f64().is_finite() {
            let divisors = UniformReal::<T>::default();
            let mut current = *x;
            loop {
                let magnitude = current.to_f64().abs();
                let (lo, hi) = divisor_band(magnitude);
                let divisor = divisors.generate_in(rng, T::from_f64(lo), T::from_f64(hi));
                current = T::from_f64(current.to_f64() / divisor.to_f64());
                xs.push(current);
                if magnitude <= REAL_SHRINK_EPSILON {
                    break;
                }
            }
        }

        xs.push(T::ZERO);
        xs
    }
}

/// Shrinks a container by length only, keeping prefixes of the original.
pub struct ContainerMinimizer<C> {
    _marker: PhantomData<fn() -> C>,
}

impl<C> Default for ContainerMinimizer<C> {
    fn default() -> Self {
        ContainerMinimizer { _marker: PhantomData }
    }
}

impl<C: Container> Minimizer for ContainerMinimizer<C> {
    type Value = C;

    fn shrink<R: Rng + ?Sized>(&self, rng: &mut R, x: &C) -> Vec<C> {
        minimizer::<usize>()
            .shrink(rng, &x.size())
            .into_iter()
            .map(|n| x.prefix(n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1234)
    }

    fn assert_integral_path<T>(xs: &[T], x: T)
    where
        T: Integral + Into<i128>,
    {
        assert_eq!(xs[0], x);
        assert_eq!(*xs.last().unwrap(), T::ZERO);
        for pair in xs.windows(2) {
            let a: i128 = pair[0].into();
            let b: i128 = pair[1].into();
            assert!(b.abs() <= a.abs(), "{:?} grew to {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_default_minimizer_is_identity() {
        let mut rng = rng();
        let xs = DefaultMinimizer::<&str>::default().shrink(&mut rng, &"abc");
        assert_eq!(xs, vec!["abc"]);
    }

    #[test]
    fn test_integral_shrinks_to_zero() {
        let mut rng = rng();
        let min = IntegralMinimizer::<i64>::default();
        for &x in &[1i64, -1, 2, 3, 7, -100, 1 << 40, i64::MIN, i64::MAX] {
            let xs = min.shrink(&mut rng, &x);
            assert!(xs.len() >= 2);
            assert_integral_path(&xs, x);
        }
    }

    #[test]
    fn test_integral_strictly_decreases_until_zero() {
        let mut rng = rng();
        let xs = IntegralMinimizer::<u32>::default().shrink(&mut rng, &u32::MAX);
        for pair in xs.windows(2) {
            assert!(pair[1] < pair[0] || pair[1] == 0);
        }
        assert_integral_path(&xs, u32::MAX);
    }

    #[test]
    fn test_integral_zero_is_single_candidate() {
        let mut rng = rng();
        assert_eq!(IntegralMinimizer::<i8>::default().shrink(&mut rng, &0), vec![0]);
    }

    #[test]
    fn test_divisor_band_boundaries() {
        let below_low = f64::from_bits(REAL_LOW_BAND_LIMIT.to_bits() - 1);
        let below_mid = f64::from_bits(REAL_MID_BAND_LIMIT.to_bits() - 1);

        assert_eq!(REAL_LOW_BAND_LIMIT, 2f64.powi(64));
        assert_eq!(REAL_MID_BAND_LIMIT, 2f64.powi(128));

        assert_eq!(divisor_band(0.0), (20.0, 30.0));
        assert_eq!(divisor_band(below_low), (20.0, 30.0));
        assert_eq!(divisor_band(REAL_LOW_BAND_LIMIT), (2e10, 2e20));
        assert_eq!(divisor_band(below_mid), (2e10, 2e20));
        assert_eq!(divisor_band(REAL_MID_BAND_LIMIT), (2e75, 2e100));
        assert_eq!(divisor_band(f64::MAX), (2e75, 2e100));
    }

    #[test]
    fn test_real_shrinks_to_zero() {
        let mut rng = rng();
        let min = RealMinimizer::<f64>::default();
        for &x in &[1.0, -3.5, 1e-30, 123456.789, 2f64.powi(64), -2f64.powi(100), f64::MAX, f64::MIN] {
            let xs = min.shrink(&mut rng, &x);
            assert_eq!(xs[0], x);
            assert_eq!(*xs.last().unwrap(), 0.0);
            for pair in xs.windows(2) {
                assert!(pair[1].abs() <= pair[0].abs());
            }
        }
    }

    #[test]
    fn test_real_first_step_uses_band_of_input() {
        let mut rng = rng();
        let min = RealMinimizer::<f64>::default();
        let low = 2f64.powi(63);
        let mid = 2f64.powi(64);
        let high = 2f64.powi(128);

        for _ in 0..50 {
            let xs = min.shrink(&mut rng, &low);
            assert!(xs[1].abs() >= low / 30.0 && xs[1].abs() <= low / 20.0);

            let xs = min.shrink(&mut rng, &mid);
            assert!(xs[1].abs() <= mid / 2e10 && xs[1].abs() >= mid / 2e20);

            let xs = min.shrink(&mut rng, &-high);
            assert!(xs[1].abs() <= high / 2e75 && xs[1].abs() >= high / 2e100);
        }
    }

    #[test]
    fn test_real_tiny_input_takes_one_step() {
        let mut rng = rng();
        let xs = RealMinimizer::<f64>::default().shrink(&mut rng, &1e-21);
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[0], 1e-21);
        assert!(xs[1].abs() < 1e-21 / 19.0);
        assert_eq!(xs[2], 0.0);
    }

    #[test]
    fn test_real_non_finite_skips_division() {
        let mut rng = rng();
        let min = RealMinimizer::<f64>::default();
        assert_eq!(min.shrink(&mut rng, &f64::INFINITY), vec![f64::INFINITY, 0.0]);
        let xs = min.shrink(&mut rng, &f64::NAN);
        assert_eq!(xs.len(), 2);
        assert!(xs[0].is_nan());
        assert_eq!(xs[1], 0.0);
    }

    #[test]
    fn test_real_narrow_formats() {
        let mut rng = rng();
        let xs = RealMinimizer::<f32>::default().shrink(&mut rng, &f32::MAX);
        assert_eq!(xs[0], f32::MAX);
        assert_eq!(*xs.last().unwrap(), 0.0);

        let x = half::f16::from_f32(-512.0);
        let ys = RealMinimizer::<half::f16>::default().shrink(&mut rng, &x);
        assert_eq!(ys[0], x);
        assert_eq!(*ys.last().unwrap(), half::f16::ZERO);
    }

    #[test]
    fn test_container_shrinks_by_prefix() {
        let mut rng = rng();
        let xs: Vec<i32> = (0..100).collect();
        let candidates = ContainerMinimizer::<Vec<i32>>::default().shrink(&mut rng, &xs);

        assert_eq!(candidates[0], xs);
        assert!(candidates.last().unwrap().is_empty());
        for pair in candidates.windows(2) {
            assert!(pair[1].len() <= pair[0].len());
        }
        for candidate in &candidates {
            assert_eq!(&xs[..candidate.len()], &candidate[..]);
        }
    }

    #[test]
    fn test_empty_container_is_single_candidate() {
        let mut rng = rng();
        let candidates =
            ContainerMinimizer::<VecDeque<u8>>::default().shrink(&mut rng, &VecDeque::new());
        assert_eq!(candidates, vec![VecDeque::new()]);
    }
}
