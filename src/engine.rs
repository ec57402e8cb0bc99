//! Property engine - generation, evaluation, shrink search and reporting.
//!
//! A [`Runner`] borrows a random source and a [`RunConfig`] for the duration
//! of one run. Each attempt draws one value per parameter from the registered
//! generators, expands every value into its candidate sequence with the
//! registered minimizers, and evaluates the property on the heads.
//!
//! When a candidate fails, the search advances every parameter's sequence
//! by one position at the same time (lock-step) for as long as the property
//! keeps failing and every sequence still has a successor. The reported
//! counterexample is the last input on that path that still failed: either
//! the next step stopped failing, or some sequence ran out. Parameters are
//! never shrunk independently of each other.
//!
//! Panics raised while generating, shrinking or evaluating are caught once
//! per attempt and end the run as a [`Outcome::Failure`].

use crate::data::Outcome;
use crate::generators::Generator;
use crate::registry::{generator, minimizer, Arbitrary};
use crate::report::{Reporter, Show};
use crate::shrinking::Minimizer;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Counters and ceilings for a property run.
///
/// The engine only ever increments the counters; they are not reset between
/// runs unless [`RunConfig::reset`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Attempts that succeeded so far
    pub tests_run: u32,

    /// Stop after this many successful attempts
    pub max_tests: u32,

    /// Attempts the property declined to judge so far
    pub discards: u32,

    /// Stop after this many discarded attempts
    pub max_discards: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tests_run: 0,
            max_tests: 128,
            discards: 0,
            max_discards: 1024,
        }
    }
}

impl RunConfig {
    pub fn new(max_tests: u32, max_discards: u32) -> Self {
        Self {
            max_tests,
            max_discards,
            ..Self::default()
        }
    }

    /// Whether neither ceiling has been reached yet.
    pub fn may_continue(&self) -> bool {
        self.tests_run < self.max_tests && self.discards < self.max_discards
    }

    pub fn reset(&mut self) {
        self.tests_run = 0;
        self.discards = 0;
    }
}

/// The parameter list of a property, as a tuple of registered types.
///
/// Implemented for tuples of one to six elements. Each element type must be
/// [`Arbitrary`] (to be generated and shrunk) and [`Show`] (to be reported).
pub trait Arguments: Sized {
    /// One candidate sequence per parameter.
    type Candidates;

    /// Generate a fresh value per parameter and expand each into its
    /// candidate sequence.
    fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self::Candidates;

    /// The parameters at the given position along every sequence.
    fn current(candidates: &Self::Candidates, depth: usize) -> Self;

    /// Whether every sequence has a candidate after `depth`.
    fn reducible(candidates: &Self::Candidates, depth: usize) -> bool;

    /// One rendered line per parameter.
    fn render(&self) -> Vec<String>;
}

macro_rules! arguments_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Arbitrary + Show),+> Arguments for ($($name,)+) {
            type Candidates = ($(Vec<$name>,)+);

            fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self::Candidates {
                ($(
                    {
                        let x = generator::<$name>().generate(rng);
                        minimizer::<$name>().shrink(rng, &x)
                    },
                )+)
            }

            fn current(candidates: &Self::Candidates, depth: usize) -> Self {
                ($(candidates.$index[depth].clone(),)+)
            }

            fn reducible(candidates: &Self::Candidates, depth: usize) -> bool {
                true $(&& candidates.$index.len() > depth + 1)+
            }

            fn render(&self) -> Vec<String> {
                vec![$(self.$index.show()),+]
            }
        }
    };
}

arguments_tuple!(A: 0);
arguments_tuple!(A: 0, B: 1);
arguments_tuple!(A: 0, B: 1, C: 2);
arguments_tuple!(A: 0, B: 1, C: 2, D: 3);
arguments_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
arguments_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

/// A predicate over typed parameters.
///
/// The random source of the run is passed along so a property can draw
/// auxiliary values (for example an interval bound, or a `oneof` pick).
pub trait Property {
    type Args: Arguments;

    /// Judge one input. Must return `Failure`, `Success` or `Discard`;
    /// `Undetermined` moves no counter, so a run would never end. Debug
    /// builds treat it as a fault.
    fn test(&mut self, rng: &mut dyn RngCore, args: Self::Args) -> Outcome;
}

/// A closure over the parameter tuple, see [`predicate`].
pub struct Predicate<A, F> {
    f: F,
    _marker: PhantomData<fn(A)>,
}

/// Turn `|(x, y): (i32, i32)| ...` into a [`Property`]. The closure may
/// return a `bool` or an [`Outcome`].
pub fn predicate<A, O, F>(f: F) -> Predicate<A, F>
where
    A: Arguments,
    F: FnMut(A) -> O,
    O: Into<Outcome>,
{
    Predicate { f, _marker: PhantomData }
}

impl<A, O, F> Property for Predicate<A, F>
where
    A: Arguments,
    F: FnMut(A) -> O,
    O: Into<Outcome>,
{
    type Args = A;

    fn test(&mut self, _rng: &mut dyn RngCore, args: A) -> Outcome {
        (self.f)(args).into()
    }
}

/// A closure that also receives the run's random source, see [`predicate_with_rng`].
pub struct RngPredicate<A, F> {
    f: F,
    _marker: PhantomData<fn(A)>,
}

pub fn predicate_with_rng<A, O, F>(f: F) -> RngPredicate<A, F>
where
    A: Arguments,
    F: FnMut(&mut dyn RngCore, A) -> O,
    O: Into<Outcome>,
{
    RngPredicate { f, _marker: PhantomData }
}

impl<A, O, F> Property for RngPredicate<A, F>
where
    A: Arguments,
    F: FnMut(&mut dyn RngCore, A) -> O,
    O: Into<Outcome>,
{
    type Args = A;

    fn test(&mut self, rng: &mut dyn RngCore, args: A) -> Outcome {
        (self.f)(rng, args).into()
    }
}

type Candidates<P> = <<P as Property>::Args as Arguments>::Candidates;

/// One property run over a borrowed random source and configuration.
pub struct Runner<'a, R: RngCore> {
    rng: &'a mut R,
    config: &'a mut RunConfig,
}

impl<'a, R: RngCore> Runner<'a, R> {
    pub fn new(rng: &'a mut R, config: &'a mut RunConfig) -> Self {
        Self { rng, config }
    }

    pub fn config(&self) -> &RunConfig {
        &*self.config
    }

    /// Run attempts until a failure, a fault, or a ceiling is reached.
    ///
    /// Returns the outcome of the last attempt; [`Outcome::Undetermined`]
    /// if the configuration allowed no attempt at all. On success the pass
    /// and discard counts are written to `out`.
    pub fn go<P: Property>(&mut self, property: &mut P, out: &mut dyn Write) -> Outcome {
        let mut reporter = Reporter::new(out);
        let mut outcome = Outcome::Undetermined;

        while self.config.may_continue() && outcome != Outcome::Failure {
            let attempt = self.config.tests_run + 1;
            log::debug!("attempt {} ({} discarded so far)", attempt, self.config.discards);

            let result = catch_unwind(AssertUnwindSafe(|| {
                let candidates = P::Args::draw(&mut *self.rng);
                self.step(property, &candidates, 0, &mut reporter)
            }));

            outcome = match result {
                Ok(outcome) => outcome,
                Err(_) => {
                    log::warn!("property panicked during attempt {}", attempt);
                    reporter.caught_fault(attempt);
                    Outcome::Failure
                }
            };

            match outcome {
                Outcome::Success => self.config.tests_run += 1,
                Outcome::Discard => self.config.discards += 1,
                _ => {}
            }
        }

        if outcome == Outcome::Success {
            reporter.passed(self.config.tests_run, self.config.discards);
        }

        log::info!(
            "property run finished with {} after {} tests ({} discarded)",
            outcome,
            self.config.tests_run,
            self.config.discards
        );
        outcome
    }

    /// Evaluate the candidates at `depth` and, on failure, keep shrinking.
    ///
    /// The returned outcome is the one at `depth`; the report is written by
    /// the deepest call that still failed.
    fn step<P: Property>(
        &mut self,
        property: &mut P,
        candidates: &Candidates<P>,
        depth: usize,
        reporter: &mut Reporter<'_>,
    ) -> Outcome {
        let outcome = property.test(&mut *self.rng, P::Args::current(candidates, depth));
        debug_assert_ne!(
            outcome,
            Outcome::Undetermined,
            "property returned Undetermined at shrink depth {}",
            depth
        );

        let report = outcome == Outcome::Failure
            && (!P::Args::reducible(candidates, depth)
                || self.step(property, candidates, depth + 1, reporter) != Outcome::Failure);

        if report {
            log::debug!("smallest failing input found at shrink depth {}", depth);
            let rendered = P::Args::current(candidates, depth).render();
            reporter.falsifiable(self.config.tests_run + 1, &rendered);
        }

        outcome
    }
}

/// Check a property with the default configuration, reporting to stdout.
pub fn quick_check<P: Property>(property: P) -> Outcome {
    let mut config = RunConfig::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    quick_check_with(property, &mut config, &mut out)
}

/// Check a property with a fresh random seed.
pub fn quick_check_with<P: Property>(property: P, config: &mut RunConfig, out: &mut dyn Write) -> Outcome {
    quick_check_seeded(property, config, out, rand::random())
}

/// Check a property with a fixed seed, so the run can be reproduced.
pub fn quick_check_seeded<P: Property>(
    mut property: P,
    config: &mut RunConfig,
    out: &mut dyn Write,
    seed: u64,
) -> Outcome {
    log::info!("checking property with seed {}", seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Runner::new(&mut rng, config).go(&mut property, out)
}
