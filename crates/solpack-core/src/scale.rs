//! Continuous scales and radius laws.
//!
//! A [`ContinuousScale`] maps a physical quantity (a semi-major axis, a mass,
//! a mean radius) from its domain into pixel space. A [`RadiusLaw`] turns a
//! body's magnitude into its render radius; every law is monotonic so that
//! larger magnitudes never draw smaller.

use log::debug;
use thiserror::Error;

/// Errors raised when building a scale.
#[derive(Debug, Error, PartialEq)]
pub enum ScaleError {
    #[error("log scale domain must be strictly positive, got [{0}, {1}]")]
    NonPositiveLogDomain(f64, f64),

    #[error("scale domain must be finite, got [{0}, {1}]")]
    NonFiniteDomain(f64, f64),
}

/// The transform applied before linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleKind {
    Linear,
    /// `sign(x) * |x|^exponent`
    Pow(f64),
    /// Shorthand for `Pow(0.5)`
    Sqrt,
    /// Natural logarithm; the domain must be strictly positive.
    Log,
}

impl ScaleKind {
    fn transform(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Pow(exponent) => value.signum() * value.abs().powf(exponent),
            Self::Sqrt => value.signum() * value.abs().sqrt(),
            Self::Log => value.ln(),
        }
    }
}

/// A continuous mapping from a numeric domain onto a pixel range.
///
/// # Examples
///
/// ```
/// use solpack_core::scale::ContinuousScale;
///
/// let scale = ContinuousScale::sqrt((0.0, 100.0), (0.0, 10.0)).unwrap();
/// assert_eq!(scale.map(25.0), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousScale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f32, f32),
    clamp: bool,
}

impl ContinuousScale {
    /// Creates a scale of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError`] when the domain is not finite, or when a log
    /// scale is given a domain that touches or crosses zero.
    pub fn new(
        kind: ScaleKind,
        domain: (f64, f64),
        range: (f32, f32),
    ) -> Result<Self, ScaleError> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ScaleError::NonFiniteDomain(domain.0, domain.1));
        }
        if kind == ScaleKind::Log && (domain.0 <= 0.0 || domain.1 <= 0.0) {
            return Err(ScaleError::NonPositiveLogDomain(domain.0, domain.1));
        }
        Ok(Self {
            kind,
            domain,
            range,
            clamp: false,
        })
    }

    /// Linear scale
    pub fn linear(domain: (f64, f64), range: (f32, f32)) -> Result<Self, ScaleError> {
        Self::new(ScaleKind::Linear, domain, range)
    }

    /// Square-root scale
    pub fn sqrt(domain: (f64, f64), range: (f32, f32)) -> Result<Self, ScaleError> {
        Self::new(ScaleKind::Sqrt, domain, range)
    }

    /// Power scale with the given exponent
    pub fn pow(exponent: f64, domain: (f64, f64), range: (f32, f32)) -> Result<Self, ScaleError> {
        Self::new(ScaleKind::Pow(exponent), domain, range)
    }

    /// Logarithmic scale
    pub fn log(domain: (f64, f64), range: (f32, f32)) -> Result<Self, ScaleError> {
        Self::new(ScaleKind::Log, domain, range)
    }

    /// Enables or disables clamping of outputs to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Returns the domain
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range
    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Maps a domain value into the range.
    ///
    /// A collapsed domain maps every input to the middle of the range.
    pub fn map(&self, value: f64) -> f32 {
        let t0 = self.kind.transform(self.domain.0);
        let t1 = self.kind.transform(self.domain.1);
        let span = t1 - t0;

        let mut t = if span == 0.0 {
            debug!(domain:? = self.domain; "Collapsed scale domain, mapping to range midpoint");
            0.5
        } else {
            (self.kind.transform(value) - t0) / span
        };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }

        let (r0, r1) = self.range;
        (f64::from(r0) + t * (f64::from(r1) - f64::from(r0))) as f32
    }
}

/// Maps a body's magnitude to its render radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusLaw {
    /// `cbrt(magnitude / reference) * scale`, for volumes: radii stay
    /// proportional to the linear size of the body.
    CubeRoot { reference: f64, scale: f32 },

    /// `sqrt(magnitude / reference) * scale`, for areas.
    SquareRoot { reference: f64, scale: f32 },

    /// An arbitrary monotonic continuous scale, possibly clamped.
    Scaled(ContinuousScale),

    /// Same radius for every body.
    Constant(f32),
}

impl RadiusLaw {
    /// Render radius for `magnitude`.
    pub fn radius(&self, magnitude: f64) -> f32 {
        match *self {
            Self::CubeRoot { reference, scale } => ((magnitude / reference).cbrt() as f32) * scale,
            Self::SquareRoot { reference, scale } => {
                ((magnitude / reference).max(0.0).sqrt() as f32) * scale
            }
            Self::Scaled(scale) => scale.map(magnitude),
            Self::Constant(radius) => radius,
        }
    }
}
