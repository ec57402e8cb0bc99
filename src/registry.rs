//! Type registry binding each value type to its generator and minimizer.
//!
//! The binding is an ordinary trait implementation, so it is resolved at
//! compile time with no lookup cost, and coherence guarantees a type has at
//! most one generator and one minimizer in a build. Registering a user type
//! means implementing [`Arbitrary`] for it:
//!
//! ```rust
//! use qcheck::generators::{Generator, UniformIntegral, IntervalGenerator};
//! use qcheck::registry::Arbitrary;
//! use qcheck::shrinking::DefaultMinimizer;
//! use rand::Rng;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Percent(u8);
//!
//! #[derive(Default)]
//! struct PercentGenerator;
//!
//! impl Generator for PercentGenerator {
//!     type Value = Percent;
//!
//!     fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Percent {
//!         Percent(UniformIntegral::<u8>::default().generate_in(rng, 0, 100))
//!     }
//! }
//!
//! impl Arbitrary for Percent {
//!     type Generator = PercentGenerator;
//!     type Minimizer = DefaultMinimizer<Percent>;
//! }
//! ```

use crate::generators::{ContainerGenerator, Generator, UniformBool, UniformIntegral, UniformReal};
use crate::shrinking::{ContainerMinimizer, DefaultMinimizer, IntegralMinimizer, Minimizer, RealMinimizer};

use std::collections::{LinkedList, VecDeque};

/// A type that can be generated and shrunk by the engine.
pub trait Arbitrary: Clone + Sized {
    type Generator: Generator<Value = Self> + Default;
    type Minimizer: Minimizer<Value = Self> + Default;
}

/// The generator registered for `T`.
pub fn generator<T: Arbitrary>() -> T::Generator {
    T::Generator::default()
}

/// The minimizer registered for `T`.
pub fn minimizer<T: Arbitrary>() -> T::Minimizer {
    T::Minimizer::default()
}

/// Register every listed type with the given generator and minimizer.
macro_rules! arbitrary_type {
    ($generator:ident, $minimizer:ident, $($ty:ty),* $(,)?) => {
        $(
            impl Arbitrary for $ty {
                type Generator = $generator<$ty>;
                type Minimizer = $minimizer<$ty>;
            }
        )*
    };
}

arbitrary_type!(
    UniformIntegral,
    IntegralMinimizer,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
);

arbitrary_type!(UniformReal, RealMinimizer, f32, f64, half::f16);

impl Arbitrary for bool {
    type Generator = UniformBool;
    type Minimizer = DefaultMinimizer<bool>;
}

macro_rules! arbitrary_container {
    ($($container:ident),* $(,)?) => {
        $(
            impl<T: Arbitrary> Arbitrary for $container<T> {
                type Generator = ContainerGenerator<$container<T>>;
                type Minimizer = ContainerMinimizer<$container<T>>;
            }
        )*
    };
}

arbitrary_container!(Vec, VecDeque, LinkedList);
