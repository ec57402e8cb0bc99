//! # qcheck
//!
//! Property-based testing with type-directed generation and lock-step
//! shrinking.
//!
//! A property is a predicate over a tuple of typed parameters. The engine
//! generates random inputs for it from the generator registered for each
//! parameter type, and when an input falsifies the property it walks the
//! candidate sequences produced by the registered minimizers to report a
//! smaller failing input.
//!
//! ```rust
//! use qcheck::{predicate, quick_check_seeded, Outcome, RunConfig};
//!
//! let mut config = RunConfig::default();
//! let mut out = Vec::new();
//!
//! let outcome = quick_check_seeded(
//!     predicate(|(xs,): (Vec<u8>,)| xs.len() <= 128),
//!     &mut config,
//!     &mut out,
//!     7,
//! );
//!
//! assert_eq!(outcome, Outcome::Success);
//! assert_eq!(String::from_utf8(out).unwrap(), "OK, 128 tests passed, 0 tests discarded\n");
//! ```
//!
//! Types become usable as parameters by implementing [`Arbitrary`], see
//! [`registry`].

pub mod combinators;
pub mod data;
pub mod engine;
pub mod generators;
pub mod registry;
pub mod report;
pub mod shrinking;

pub use combinators::{frequency, oneof, CombinatorError};
pub use data::Outcome;
pub use engine::{
    predicate, predicate_with_rng, quick_check, quick_check_seeded, quick_check_with, Arguments,
    Property, RunConfig, Runner,
};
pub use generators::{Generator, IntervalGenerator};
pub use registry::{generator, minimizer, Arbitrary};
pub use report::Show;
pub use shrinking::Minimizer;
