//! Chebyshev Type-I low-pass filter
//!
//! Anti-aliasing filter for the decimated band streams. The design is fully
//! analytic and runs on every rebuild:
//!
//! 1. **Analog prototype**: poles arranged on a sinh-ellipse in the left
//!    half of the s-plane, with the passband ripple setting the ellipse
//!    eccentricity.
//! 2. **Low-pass transform**: poles scaled by the warped cutoff
//!    `4 * tan(pi * cutoff / 2)`.
//! 3. **Bilinear transform**: discretization at `fs2 = 4`, moving the zeros
//!    that were at infinity to the Nyquist frequency.
//! 4. **Polynomial expansion**: pole/zero products expanded by pairwise
//!    convolution into the real coefficient vectors `b` and `a`.
//!
//! Streaming runs a Direct Form II Transposed recurrence over a memory of
//! `order` state variables.
//!
//! ## Example
//!
//! ```rust
//! use cwt_bank::lowpass::LowpassFilter;
//!
//! let mut lpf = LowpassFilter::new(0.25, 4, 0.05).unwrap();
//! let y = lpf.filter(1.0);
//! assert!(y.is_finite());
//! ```

use num_complex::Complex64;

use crate::attribute::Attribute;
use crate::types::{CwtError, CwtResult};

/// Default filter order.
pub const DEFAULT_ORDER: usize = 4;

/// Default passband ripple in dB.
pub const DEFAULT_RIPPLE_DB: f64 = 0.05;

/// Chebyshev Type-I IIR low-pass filter with streaming state.
#[derive(Debug, Clone)]
pub struct LowpassFilter {
    /// Cutoff frequency normalized to Nyquist, in (0, 1]
    cutoff: Attribute<f64>,
    /// Filter order
    order: Attribute<usize>,
    /// Passband ripple (dB)
    ripple_db: Attribute<f64>,
    /// Numerator coefficients, length order + 1
    b: Vec<f64>,
    /// Denominator coefficients, length order + 1 (a[0] = 1)
    a: Vec<f64>,
    /// Direct Form II Transposed memory, length order
    z: Vec<f64>,
}

impl LowpassFilter {
    /// Design a new filter.
    ///
    /// Fails with [`CwtError::Invalid`] when `cutoff` is outside `(0, 1]`.
    pub fn new(cutoff: f64, order: usize, ripple_db: f64) -> CwtResult<Self> {
        validate_cutoff(cutoff)?;
        let mut filter = Self {
            cutoff: Attribute::with_limits(cutoff, 0.0, 1.0)?,
            order: Attribute::with_min(order, 1)?,
            ripple_db: Attribute::new(ripple_db),
            b: Vec::new(),
            a: Vec::new(),
            z: Vec::new(),
        };
        filter.init()?;
        Ok(filter)
    }

    /// Design with the default order and ripple.
    pub fn with_cutoff(cutoff: f64) -> CwtResult<Self> {
        Self::new(cutoff, DEFAULT_ORDER, DEFAULT_RIPPLE_DB)
    }

    /// Normalized cutoff frequency.
    pub fn cutoff(&self) -> f64 {
        self.cutoff.get()
    }

    /// Filter order.
    pub fn order(&self) -> usize {
        self.order.get()
    }

    /// Passband ripple in dB.
    pub fn ripple_db(&self) -> f64 {
        self.ripple_db.get()
    }

    /// Numerator coefficients.
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients.
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Change the cutoff, redesigning the filter and clearing its memory.
    pub fn set_cutoff(&mut self, cutoff: f64) -> CwtResult<()> {
        validate_cutoff(cutoff)?;
        self.cutoff.set(cutoff)?;
        self.init()
    }

    /// Change the order, redesigning the filter and clearing its memory.
    pub fn set_order(&mut self, order: usize) -> CwtResult<()> {
        self.order.set(order)?;
        self.init()
    }

    /// Change the ripple, redesigning the filter and clearing its memory.
    pub fn set_ripple_db(&mut self, ripple_db: f64) -> CwtResult<()> {
        self.ripple_db.set(ripple_db)?;
        self.init()
    }

    /// Rebuild `b`/`a` from the current attributes and zero the memory.
    fn init(&mut self) -> CwtResult<()> {
        let (b, a) = design_cheby1(self.order.get(), self.ripple_db.get(), self.cutoff.get())?;
        self.b = b;
        self.a = a;
        self.z = vec![0.0; self.order.get()];
        Ok(())
    }

    /// Clear the filter memory without redesigning.
    pub fn reset(&mut self) {
        for state in self.z.iter_mut() {
            *state = 0.0;
        }
    }

    /// Filter one sample (Direct Form II Transposed).
    pub fn filter(&mut self, value: f64) -> f64 {
        let n = self.order.get();
        let filtered = self.b[0] * value + self.z[0];
        for i in 0..n - 1 {
            self.z[i] = self.b[i + 1] * value + self.z[i + 1] - self.a[i + 1] * filtered;
        }
        self.z[n - 1] = self.b[n] * value - self.a[n] * filtered;
        filtered
    }
}

/// Check that a normalized cutoff lies in `(0, 1]`.
fn validate_cutoff(cutoff: f64) -> CwtResult<()> {
    if cutoff <= 0.0 || cutoff > 1.0 {
        return Err(CwtError::Invalid(format!(
            "low-pass cutoff must lie in (0, 1], got {cutoff}"
        )));
    }
    Ok(())
}

/// Full Chebyshev Type-I design: prototype, warp, bilinear, expansion.
///
/// Returns `(b, a)`, each of length `order + 1`.
fn design_cheby1(order: usize, ripple_db: f64, cutoff: f64) -> CwtResult<(Vec<f64>, Vec<f64>)> {
    validate_cutoff(cutoff)?;

    let (mut poles, mut k) = cheby1_prototype(order, ripple_db);

    let warped_cutoff = 4.0 * (std::f64::consts::PI * cutoff / 2.0).tan();
    k = lowpass_transform(&mut poles, k, warped_cutoff);

    let (zeros, k) = bilinear(&mut poles, k);

    Ok(transfer_function(&zeros, &poles, k))
}

/// Analog prototype: poles on a sinh-ellipse, plus the prototype gain.
fn cheby1_prototype(order: usize, ripple_db: f64) -> (Vec<Complex64>, f64) {
    // Ripple factor (epsilon)
    let eps = (10.0_f64.powf(0.1 * ripple_db) - 1.0).sqrt();
    let mu = (1.0 / eps).asinh() / order as f64;

    let mut poles = Vec::with_capacity(order);
    let mut k_c = Complex64::new(1.0, 0.0);
    for i in 0..order {
        let theta = std::f64::consts::PI * (2.0 * i as f64 + 1.0 - order as f64)
            / (2.0 * order as f64);
        let pole = -Complex64::new(mu, theta).sinh();
        k_c *= -pole;
        poles.push(pole);
    }

    let mut k = k_c.re;
    if order % 2 == 0 {
        k /= (1.0 + eps * eps).sqrt();
    }
    (poles, k)
}

/// Scale the prototype to the warped cutoff, compensating the gain.
fn lowpass_transform(poles: &mut [Complex64], k: f64, wo: f64) -> f64 {
    for pole in poles.iter_mut() {
        *pole *= wo;
    }
    // Each shifted pole decreases the gain by wo; cancel the net change
    k * wo.powi(poles.len() as i32)
}

/// Bilinear transform at fs2 = 4. Zeros that were at infinity move to the
/// Nyquist frequency. Returns the new zeros and the adjusted gain.
fn bilinear(poles: &mut [Complex64], k: f64) -> (Vec<Complex64>, f64) {
    let fs2 = 4.0;

    let mut factor = Complex64::new(1.0, 0.0);
    for pole in poles.iter() {
        factor *= fs2 - *pole;
    }
    let factor = Complex64::new(1.0, 0.0) / factor;

    let zeros = vec![Complex64::new(-1.0, 0.0); poles.len()];
    for pole in poles.iter_mut() {
        *pole = (fs2 + *pole) / (fs2 - *pole);
    }

    (zeros, k * factor.re)
}

/// Expand zeros/poles into real transfer-function coefficients.
fn transfer_function(zeros: &[Complex64], poles: &[Complex64], k: f64) -> (Vec<f64>, Vec<f64>) {
    let b: Vec<f64> = poly(zeros).iter().map(|c| k * c.re).collect();
    let a: Vec<f64> = poly(poles).iter().map(|c| c.re).collect();
    (b, a)
}

/// Polynomial with the given roots, as coefficients in descending powers.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut result = vec![Complex64::new(1.0, 0.0)];
    for root in roots {
        result = convolve(&result, &[Complex64::new(1.0, 0.0), -*root]);
    }
    result
}

/// Linear convolution of two coefficient sequences.
fn convolve(x: &[Complex64], y: &[Complex64]) -> Vec<Complex64> {
    let (x, y) = if y.len() > x.len() { (y, x) } else { (x, y) };
    let mut result = vec![Complex64::new(0.0, 0.0); x.len() + y.len() - 1];
    for (i, value) in result.iter_mut().enumerate() {
        let k_min = i.saturating_sub(y.len() - 1);
        let k_max = i.min(x.len() - 1);
        for k in k_min..=k_max {
            *value += x[k] * y[i - k];
        }
    }
    result
}
