use rand::Rng;

/// Upper (exclusive) bound of the random component added to every score.
pub const MAX_NOISE: f64 = 0.2;

const MAX_DRAW: f64 = MAX_NOISE - f64::EPSILON;

/// Source of the random component of a fraud score.
///
/// Implementations must return values in `[0.0, MAX_NOISE)` and be callable
/// from any request task concurrently.
#[cfg_attr(test, mockall::automock)]
pub trait NoiseSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Uniform noise from the calling thread's generator; no shared lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNoise;

impl NoiseSource for ThreadRngNoise {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..MAX_NOISE)
    }
}

/// Always returns the same draw. Values are clamped into `[0.0, MAX_NOISE)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(f64);

impl FixedNoise {
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, MAX_DRAW))
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Largest value strictly below `MAX_NOISE`.
    pub fn max() -> Self {
        Self(MAX_DRAW)
    }
}

impl NoiseSource for FixedNoise {
    fn sample(&self) -> f64 {
        self.0
    }
}
