// Uniform value generators.
// This module contains the generator contracts, the numeric categories
// they are defined over, and the generators bound to the built-in types.

use crate::registry::{generator, Arbitrary};

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use std::collections::{LinkedList, VecDeque};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Div;

/// Upper bound (inclusive) on the length of a generated container.
pub const MAX_CONTAINER_LEN: usize = 128;

/// Produces random values of a single type from a random source.
///
/// Generators are stateless strategies; every draw consumes entropy from
/// the source passed in and has no other effect.
pub trait Generator {
    type Value;

    /// Draw a value from the whole domain of the type.
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Value;
}

/// A generator over an ordered type that can also draw from a closed interval.
pub trait IntervalGenerator: Generator {
    /// Draw uniformly from `[min, max]`. Panics if `min > max`.
    fn generate_in<R: Rng + ?Sized>(&self, rng: &mut R, min: Self::Value, max: Self::Value)
        -> Self::Value;

    fn generate_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        (min, max): (Self::Value, Self::Value),
    ) -> Self::Value {
        self.generate_in(rng, min, max)
    }
}

/// Integer primitives. Only these can back a [`UniformIntegral`].
pub trait Integral: Copy + Ord + fmt::Debug + SampleUniform + Div<Output = Self> {
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;
    const TWO: Self;
    const THREE: Self;
}

macro_rules! integral_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integral for $ty {
                const MIN: Self = <$ty>::MIN;
                const MAX: Self = <$ty>::MAX;
                const ZERO: Self = 0;
                const TWO: Self = 2;
                const THREE: Self = 3;
            }
        )*
    };
}

integral_type!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Floating-point primitives. Only these can back a [`UniformReal`].
///
/// Arithmetic on the generic side is carried out in `f64`, which holds every
/// value of the narrower formats exactly.
pub trait Real: Copy + PartialOrd + fmt::Debug {
    /// Most negative finite value.
    const LOWEST: Self;
    /// Most positive finite value.
    const HIGHEST: Self;
    const ZERO: Self;

    fn to_f64(self) -> f64;

    /// Round an `f64` to the nearest value of this format.
    fn from_f64(value: f64) -> Self;
}

impl Real for f64 {
    const LOWEST: Self = f64::MIN;
    const HIGHEST: Self = f64::MAX;
    const ZERO: Self = 0.0;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Real for f32 {
    const LOWEST: Self = f32::MIN;
    const HIGHEST: Self = f32::MAX;
    const ZERO: Self = 0.0;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Real for half::f16 {
    const LOWEST: Self = half::f16::MIN;
    const HIGHEST: Self = half::f16::MAX;
    const ZERO: Self = half::f16::ZERO;

    fn to_f64(self) -> f64 {
        self.to_f64_const()
    }

    fn from_f64(value: f64) -> Self {
        half::f16::from_f64_const(value)
    }
}

/// Uniform integers, exact over every integer in the requested range.
pub struct UniformIntegral<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for UniformIntegral<T> {
    fn default() -> Self {
        UniformIntegral { _marker: PhantomData }
    }
}

impl<T: Integral> Generator for UniformIntegral<T> {
    type Value = T;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.generate_in(rng, T::MIN, T::MAX)
    }
}

impl<T: Integral> IntervalGenerator for UniformIntegral<T> {
    fn generate_in<R: Rng + ?Sized>(&self, rng: &mut R, min: T, max: T) -> T {
        assert!(min <= max, "empty interval [{:?}, {:?}]", min, max);
        rng.gen_range(min..=max)
    }
}

/// Uniform reals over a closed interval, both endpoints included.
///
/// The draw is the convex combination `min * (1 - t) + max * t` with `t`
/// uniform on `[0, 1]`, so `t = 0` and `t = 1` hit the endpoints exactly and
/// the full finite range never overflows the way `max - min` would.
pub struct UniformReal<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for UniformReal<T> {
    fn default() -> Self {
        UniformReal { _marker: PhantomData }
    }
}

impl<T: Real> Generator for UniformReal<T> {
    type Value = T;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.generate_in(rng, T::LOWEST, T::HIGHEST)
    }
}

impl<T: Real> IntervalGenerator for UniformReal<T> {
    fn generate_in<R: Rng + ?Sized>(&self, rng: &mut R, min: T, max: T) -> T {
        let (lo, hi) = (min.to_f64(), max.to_f64());
        assert!(
            lo.is_finite() && hi.is_finite(),
            "interval bounds must be finite: [{:?}, {:?}]",
            min,
            max
        );
        assert!(lo <= hi, "empty interval [{:?}, {:?}]", min, max);

        let t: f64 = rng.gen_range(0.0..=1.0);
        let value = lo * (1.0 - t) + hi * t;
        T::from_f64(value.max(lo).min(hi))
    }
}

/// Fair coin flips.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformBool;

impl Generator for UniformBool {
    type Value = bool;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen()
    }
}

/// A sequence container that can be grown at the back and cut to a prefix.
pub trait Container: Default + Clone {
    type Item: Arbitrary;

    fn size(&self) -> usize;

    fn push_back(&mut self, item: Self::Item);

    /// A new container holding the first `n` elements, in order.
    fn prefix(&self, n: usize) -> Self;
}

impl<T: Arbitrary> Container for Vec<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn push_back(&mut self, item: T) {
        self.push(item);
    }

    fn prefix(&self, n: usize) -> Self {
        self[..n.min(self.len())].to_vec()
    }
}

impl<T: Arbitrary> Container for VecDeque<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn push_back(&mut self, item: T) {
        VecDeque::push_back(self, item);
    }

    fn prefix(&self, n: usize) -> Self {
        self.iter().take(n).cloned().collect()
    }
}

impl<T: Arbitrary> Container for LinkedList<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn push_back(&mut self, item: T) {
        LinkedList::push_back(self, item);
    }

    fn prefix(&self, n: usize) -> Self {
        self.iter().take(n).cloned().collect()
    }
}

/// Containers filled with independently generated elements.
pub struct ContainerGenerator<C> {
    _marker: PhantomData<fn() -> C>,
}

impl<C> Default for ContainerGenerator<C> {
    fn default() -> Self {
        ContainerGenerator { _marker: PhantomData }
    }
}

impl<C: Container> ContainerGenerator<C> {
    /// Generate a container of exactly `n` elements.
    pub fn generate_len<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> C {
        let elements = generator::<C::Item>();
        let mut xs = C::default();
        for _ in 0..n {
            xs.push_back(elements.generate(rng));
        }
        xs
    }
}

impl<C: Container> Generator for ContainerGenerator<C> {
    type Value = C;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> C {
        let n = generator::<usize>().generate_in(rng, 0, MAX_CONTAINER_LEN);
        self.generate_len(rng, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_integral_interval_stays_in_bounds() {
        let mut rng = rng();
        let gen = UniformIntegral::<i32>::default();
        for _ in 0..1000 {
            let x = gen.generate_in(&mut rng, -17, 23);
            assert!((-17..=23).contains(&x));
        }
    }

    #[test]
    fn test_integral_interval_hits_both_endpoints() {
        let mut rng = rng();
        let gen = UniformIntegral::<u8>::default();
        let draws: Vec<u8> = (0..500).map(|_| gen.generate_in(&mut rng, 2, 3)).collect();
        assert!(draws.contains(&2));
        assert!(draws.contains(&3));
    }

    #[test]
    fn test_integral_full_range() {
        let mut rng = rng();
        let _ = UniformIntegral::<u128>::default().generate(&mut rng);
        let _ = UniformIntegral::<i128>::default().generate(&mut rng);
        let x = UniformIntegral::<i64>::default().generate_pair(&mut rng, (7, 7));
        assert_eq!(x, 7);
    }

    #[test]
    #[should_panic]
    fn test_integral_empty_interval_panics() {
        let mut rng = rng();
        UniformIntegral::<i32>::default().generate_in(&mut rng, 5, 4);
    }

    #[test]
    fn test_real_interval_stays_in_bounds() {
        let mut rng = rng();
        let gen = UniformReal::<f64>::default();
        for _ in 0..1000 {
            let x = gen.generate_in(&mut rng, -0.5, 2.25);
            assert!((-0.5..=2.25).contains(&x));
        }
        let gen = UniformReal::<f32>::default();
        for _ in 0..1000 {
            let x = gen.generate_in(&mut rng, 20.0, 30.0);
            assert!((20.0..=30.0).contains(&x));
        }
    }

    #[test]
    fn test_real_degenerate_interval() {
        let mut rng = rng();
        let x = UniformReal::<f64>::default().generate_in(&mut rng, 1.5, 1.5);
        assert_eq!(x, 1.5);
    }

    #[test]
    fn test_real_unbounded_is_finite_and_signed() {
        let mut rng = rng();
        let gen = UniformReal::<f64>::default();
        let draws: Vec<f64> = (0..200).map(|_| gen.generate(&mut rng)).collect();
        assert!(draws.iter().all(|x| x.is_finite()));
        assert!(draws.iter().any(|x| *x < 0.0));
        assert!(draws.iter().any(|x| *x > 0.0));
    }

    #[test]
    fn test_half_precision_interval() {
        let mut rng = rng();
        let gen = UniformReal::<half::f16>::default();
        let lo = half::f16::from_f32(-1.0);
        let hi = half::f16::from_f32(1.0);
        for _ in 0..200 {
            let x = gen.generate_in(&mut rng, lo, hi);
            assert!(x >= lo && x <= hi);
        }
    }

    #[test]
    #[should_panic]
    fn test_real_infinite_bound_panics() {
        let mut rng = rng();
        UniformReal::<f64>::default().generate_in(&mut rng, 0.0, f64::INFINITY);
    }

    #[test]
    fn test_container_length_is_bounded() {
        let mut rng = rng();
        let gen = ContainerGenerator::<Vec<i32>>::default();
        let mut saw_long = false;
        for _ in 0..200 {
            let xs = gen.generate(&mut rng);
            assert!(xs.len() <= MAX_CONTAINER_LEN);
            saw_long |= xs.len() > MAX_CONTAINER_LEN / 2;
        }
        assert!(saw_long);
    }

    #[test]
    fn test_container_generate_len() {
        let mut rng = rng();
        let xs = ContainerGenerator::<LinkedList<u16>>::default().generate_len(&mut rng, 9);
        assert_eq!(xs.len(), 9);
        let ys = ContainerGenerator::<VecDeque<f32>>::default().generate_len(&mut rng, 0);
        assert!(ys.is_empty());
    }

    #[test]
    fn test_container_prefix_keeps_order() {
        let xs = vec![5, 4, 3, 2, 1];
        assert_eq!(xs.prefix(3), vec![5, 4, 3]);
        assert_eq!(xs.prefix(0), Vec::<i32>::new());
        let ys: VecDeque<i32> = xs.iter().cloned().collect();
        assert_eq!(ys.prefix(2), VecDeque::from(vec![5, 4]));
    }
}
