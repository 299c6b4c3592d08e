//! Yield jitter
//!
//! The final estimate is perturbed by a uniform offset in ±10%. The offset
//! comes from an injectable source so tests (and deterministic deployments)
//! can pin it, while production draws from the thread-local RNG.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Maximum relative perturbation applied to the yield estimate
pub const JITTER_SPAN: f64 = 0.1;

/// Source of multiplicative offsets in `[-JITTER_SPAN, JITTER_SPAN]`
pub trait JitterSource {
    fn next_offset(&mut self) -> f64;
}

impl<J: JitterSource + ?Sized> JitterSource for &mut J {
    fn next_offset(&mut self) -> f64 {
        (**self).next_offset()
    }
}

/// Uniform draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct UniformJitter<R> {
    rng: R,
}

impl<R: Rng> UniformJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformJitter<StdRng> {
    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl UniformJitter<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> JitterSource for UniformJitter<R> {
    fn next_offset(&mut self) -> f64 {
        self.rng.gen_range(-JITTER_SPAN..=JITTER_SPAN)
    }
}

/// Constant offset, clamped into the jitter span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    /// No perturbation: the estimate is exactly the factor product
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn new(offset: f64) -> Self {
        Self(offset.clamp(-JITTER_SPAN, JITTER_SPAN))
    }

    pub fn offset(&self) -> f64 {
        self.0
    }
}

impl JitterSource for FixedJitter {
    fn next_offset(&mut self) -> f64 {
        self.0
    }
}

/// How a long-lived service obtains jitter for each prediction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum JitterMode {
    /// Fresh uniform draw per prediction
    #[default]
    Random,

    /// Same offset every time
    Fixed(f64),
}

impl JitterMode {
    /// Run `f` with a source for this mode.
    ///
    /// The thread-local RNG is not `Send`, so the source is scoped to the call
    /// rather than returned.
    pub fn with_source<T>(&self, f: impl FnOnce(&mut dyn JitterSource) -> T) -> T {
        match *self {
            JitterMode::Random => f(&mut UniformJitter::thread_local()),
            JitterMode::Fixed(offset) => f(&mut FixedJitter::new(offset)),
        }
    }

    pub fn label(&self) -> String {
        match self {
            JitterMode::Random => format!("random (±{:.0}%)", JITTER_SPAN * 100.0),
            JitterMode::Fixed(offset) => format!("fixed ({:+.3})", offset),
        }
    }
}
