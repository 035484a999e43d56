//! Wavelet kernels
//!
//! Sampled analytic wavelets for the streaming and spectral transform paths.
//! A [`Wavelet`] owns its tunable attributes (sample rate, scale, window
//! size, domain, delay, padding) together with the materialized kernel: the
//! complex `values` vector and, in the time domain, the pre/post padding
//! scalars used as boundary corrections by the filterbank.
//!
//! ## Families
//!
//! - **Morlet** (Gabor): a complex exponential under a Gaussian envelope,
//!   with the low-`omega0` correction term of the complete Morlet wavelet.
//! - **Paul**: an analytic wavelet with algebraic decay, parameterized by an
//!   integer order.
//!
//! Family dispatch is a closed tagged sum; kernel evaluation is hot and
//! avoids dynamic dispatch.
//!
//! ## Domains
//!
//! A kernel lives in one of two domains, selected by the `mode` attribute:
//!
//! - [`Mode::Recursive`]: `values[t] = phi((t - W/2) / (scale * fs))`, the
//!   time-domain window used for per-sample inner products. The padding
//!   scalars sum the conjugated wavelet tails just outside the window.
//! - [`Mode::Spectral`]: `values[t] = phi_spectral(scale * omega_t)` laid out
//!   in DFT order (positive frequencies first), used by the FFT batch path.
//!
//! ## Example
//!
//! ```rust
//! use cwt_bank::wavelet::{Family, Wavelet};
//!
//! let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
//! morlet.set_window_size(9).unwrap();
//! assert_eq!(morlet.values().len(), 9);
//! // Equivalent Fourier frequency of the current scale
//! let freq = morlet.scale_to_frequency(morlet.scale());
//! assert!(freq > 0.0);
//! ```

use std::f64::consts::{PI, SQRT_2};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::types::{Complex, CwtError, CwtResult, Value};

/// Default delay, in units of e-folding times.
pub const DEFAULT_DELAY: f64 = 1.5;

/// Default padding, in units of e-folding times.
pub const DEFAULT_PADDING: f64 = 1.0;

/// Default Morlet carrier frequency.
pub const DEFAULT_OMEGA0: f64 = 5.0;

/// Default Paul wavelet order.
pub const DEFAULT_PAUL_ORDER: usize = 2;

/// Wavelet family selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    /// Complex Morlet (Gabor) wavelet
    Morlet,
    /// Paul wavelet
    Paul,
}

/// Domain of the materialized kernel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    /// Time-domain window, used by the streaming path
    Recursive,
    /// Frequency-domain kernel, used by the FFT batch path
    Spectral,
}

/// Family-specific state.
#[derive(Debug, Clone)]
enum Kernel {
    Morlet {
        /// Carrier frequency of the complex exponential
        omega0: Attribute<f64>,
    },
    Paul {
        /// Order of the Paul wavelet
        order: Attribute<usize>,
    },
}

/// A sampled analytic wavelet at a given scale and sample rate.
#[derive(Debug, Clone)]
pub struct Wavelet {
    sample_rate: Attribute<f64>,
    scale: Attribute<f64>,
    window_size: Attribute<usize>,
    mode: Attribute<Mode>,
    delay: Attribute<f64>,
    padding: Attribute<f64>,
    kernel: Kernel,
    /// Sampled kernel (time domain in Recursive mode, DFT order in Spectral)
    values: Vec<Complex>,
    /// Sum of conjugated samples over the pre-window padding region
    prepad: Complex,
    /// Sum of conjugated samples over the post-window padding region
    postpad: Complex,
}

impl Wavelet {
    /// Create a wavelet of the given family.
    ///
    /// The initial scale is `2 / sample_rate` and the window holds a single
    /// sample; callers typically follow up with
    /// [`set_scale`](Self::set_scale) and
    /// [`set_default_window_size`](Self::set_default_window_size).
    ///
    /// Fails with [`CwtError::Invalid`] when `sample_rate` is not positive.
    pub fn new(family: Family, sample_rate: f64) -> CwtResult<Self> {
        if sample_rate <= 0.0 {
            return Err(CwtError::Invalid(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        let kernel = match family {
            Family::Morlet => Kernel::Morlet {
                omega0: Attribute::with_min(DEFAULT_OMEGA0, f64::MIN_POSITIVE)?,
            },
            Family::Paul => Kernel::Paul {
                order: Attribute::with_min(DEFAULT_PAUL_ORDER, 1)?,
            },
        };
        let mut wavelet = Self {
            sample_rate: Attribute::with_min(sample_rate, f64::MIN_POSITIVE)?,
            scale: Attribute::with_min(2.0 / sample_rate, f64::MIN_POSITIVE)?,
            window_size: Attribute::with_min(1, 1)?,
            mode: Attribute::with_limits(Mode::Recursive, Mode::Recursive, Mode::Spectral)?,
            delay: Attribute::with_min(DEFAULT_DELAY, 0.0)?,
            padding: Attribute::with_min(DEFAULT_PADDING, 0.0)?,
            kernel,
            values: Vec::new(),
            prepad: Complex::new(0.0, 0.0),
            postpad: Complex::new(0.0, 0.0),
        };
        wavelet.init();
        Ok(wavelet)
    }

    /// Wavelet family.
    pub fn family(&self) -> Family {
        match self.kernel {
            Kernel::Morlet { .. } => Family::Morlet,
            Kernel::Paul { .. } => Family::Paul,
        }
    }

    /// Sampling rate of the stream this kernel analyzes.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate.get()
    }

    /// Current scale (time dilation of the mother wavelet).
    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    /// Number of samples in the materialized window.
    pub fn window_size(&self) -> usize {
        self.window_size.get()
    }

    /// Current kernel domain.
    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Delay in units of e-folding times.
    pub fn delay(&self) -> f64 {
        self.delay.get()
    }

    /// Padding in units of e-folding times.
    pub fn padding(&self) -> f64 {
        self.padding.get()
    }

    /// Sampled kernel values.
    pub fn values(&self) -> &[Complex] {
        &self.values
    }

    /// Boundary correction applied to the oldest sample of the window.
    pub fn prepad(&self) -> Complex {
        self.prepad
    }

    /// Boundary correction applied to the newest sample of the window.
    pub fn postpad(&self) -> Complex {
        self.postpad
    }

    /// Set the sampling rate and rebuild the kernel.
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> CwtResult<()> {
        self.sample_rate.set(sample_rate)?;
        self.init();
        Ok(())
    }

    /// Set the scale and rebuild the kernel.
    pub fn set_scale(&mut self, scale: f64) -> CwtResult<()> {
        self.scale.set(scale)?;
        self.init();
        Ok(())
    }

    /// Set the window size and rebuild the kernel.
    pub fn set_window_size(&mut self, window_size: usize) -> CwtResult<()> {
        self.window_size.set(window_size)?;
        self.init();
        Ok(())
    }

    /// Switch between time-domain and frequency-domain kernels.
    pub fn set_mode(&mut self, mode: Mode) -> CwtResult<()> {
        self.mode.set(mode)?;
        self.init();
        Ok(())
    }

    /// Set the delay (in e-folding times) and rebuild the kernel.
    pub fn set_delay(&mut self, delay: f64) -> CwtResult<()> {
        self.delay.set(delay)?;
        self.init();
        Ok(())
    }

    /// Set the padding (in e-folding times) and rebuild the kernel.
    pub fn set_padding(&mut self, padding: f64) -> CwtResult<()> {
        self.padding.set(padding)?;
        self.init();
        Ok(())
    }

    /// Morlet carrier frequency, or [`CwtError::NotFound`] for other families.
    pub fn omega0(&self) -> CwtResult<f64> {
        match &self.kernel {
            Kernel::Morlet { omega0 } => Ok(omega0.get()),
            Kernel::Paul { .. } => Err(CwtError::NotFound("omega0".to_string())),
        }
    }

    /// Set the Morlet carrier frequency and rebuild the kernel.
    pub fn set_omega0(&mut self, value: f64) -> CwtResult<()> {
        match &mut self.kernel {
            Kernel::Morlet { omega0 } => omega0.set(value)?,
            Kernel::Paul { .. } => return Err(CwtError::NotFound("omega0".to_string())),
        }
        self.init();
        Ok(())
    }

    /// Paul order, or [`CwtError::NotFound`] for other families.
    pub fn order(&self) -> CwtResult<usize> {
        match &self.kernel {
            Kernel::Paul { order } => Ok(order.get()),
            Kernel::Morlet { .. } => Err(CwtError::NotFound("order".to_string())),
        }
    }

    /// Set the Paul order and rebuild the kernel.
    pub fn set_order(&mut self, value: usize) -> CwtResult<()> {
        match &mut self.kernel {
            Kernel::Paul { order } => order.set(value)?,
            Kernel::Morlet { .. } => return Err(CwtError::NotFound("order".to_string())),
        }
        self.init();
        Ok(())
    }

    /// Equivalent Fourier frequency of a scale.
    pub fn scale_to_frequency(&self, scale: f64) -> f64 {
        match &self.kernel {
            Kernel::Morlet { omega0 } => {
                let w0 = omega0.get();
                (w0 + (2.0 + w0 * w0).sqrt()) / (4.0 * PI * scale)
            }
            Kernel::Paul { order } => {
                (2.0 * order.get() as f64 + 1.0) / (4.0 * PI * scale)
            }
        }
    }

    /// Scale whose equivalent Fourier frequency is `frequency`.
    pub fn frequency_to_scale(&self, frequency: f64) -> f64 {
        match &self.kernel {
            Kernel::Morlet { omega0 } => {
                let w0 = omega0.get();
                (w0 + (2.0 + w0 * w0).sqrt()) / (4.0 * PI * frequency)
            }
            Kernel::Paul { order } => {
                (2.0 * order.get() as f64 + 1.0) / (4.0 * PI * frequency)
            }
        }
    }

    /// Characteristic decay time of the envelope at the current scale.
    pub fn e_folding_time(&self) -> f64 {
        match &self.kernel {
            Kernel::Morlet { .. } => SQRT_2 * self.scale.get(),
            Kernel::Paul { .. } => self.scale.get() / SQRT_2,
        }
    }

    /// Time-domain mother wavelet sample at `arg`, normalized by the current
    /// scale and sample rate.
    pub fn phi(&self, arg: f64) -> Complex {
        let norm = (1.0 / (self.scale.get() * self.sample_rate.get())).sqrt();
        match &self.kernel {
            Kernel::Morlet { omega0 } => {
                let w0 = omega0.get();
                // Complete Morlet wavelet: the constant subtraction keeps the
                // kernel zero-mean even at low omega0.
                let envelope = (-0.5 * arg * arg).exp();
                let carrier = Complex::new(0.0, w0 * arg).exp()
                    - Complex::new((-0.5 * w0 * w0).exp(), 0.0);
                envelope * carrier * norm * PI.powf(-0.25)
            }
            Kernel::Paul { order } => {
                let m = order.get();
                let numer = Complex::new(0.0, 2.0).powu(m as u32) * factorial(m);
                let denom = (PI * factorial(2 * m)).sqrt();
                let tail = Complex::new(1.0, -arg).powi(-(m as i32) - 1);
                (numer / denom) * tail * norm
            }
        }
    }

    /// Frequency-domain mother wavelet sample at `s_omega = scale * omega`.
    ///
    /// Both families are analytic: the spectrum vanishes for non-positive
    /// `s_omega`.
    pub fn phi_spectral(&self, s_omega: f64) -> Complex {
        if s_omega <= 0.0 {
            return Complex::new(0.0, 0.0);
        }
        match &self.kernel {
            Kernel::Morlet { omega0 } => {
                let w0 = omega0.get();
                let gauss = (-0.5 * (s_omega - w0) * (s_omega - w0)).exp();
                let norm = (2.0 * PI * self.scale.get() * self.sample_rate.get()).sqrt();
                Complex::new(PI.powf(-0.25) * gauss * norm, 0.0)
            }
            Kernel::Paul { order } => {
                let m = order.get();
                let numer = 2.0_f64.powi(m as i32);
                let denom = (m as f64 * factorial(2 * m - 1)).sqrt();
                Complex::new((numer / denom) * s_omega.powi(m as i32) * (-s_omega).exp(), 0.0)
            }
        }
    }

    /// Size the window to cover `2 * delay` e-folding times, then rebuild.
    ///
    /// The result is always odd and at least 3, so the window has a center
    /// sample.
    pub fn set_default_window_size(&mut self) -> CwtResult<()> {
        let mut winsize =
            (2.0 * self.delay.get() * self.e_folding_time() * self.sample_rate.get()) as usize;
        if winsize < 3 {
            winsize = 3;
        }
        winsize += (winsize % 2 == 0) as usize;
        self.window_size.set(winsize)?;
        self.init();
        Ok(())
    }

    /// Materialize the kernel from the current attributes.
    ///
    /// In Recursive mode this also recomputes the padding scalars: sums of
    /// the conjugated wavelet over `padding * e_folding_time * sample_rate`
    /// samples just before and after the window.
    pub fn init(&mut self) {
        let w = self.window_size.get();
        let scale = self.scale.get();
        let sample_rate = self.sample_rate.get();
        let mut values = vec![Complex::new(0.0, 0.0); w];

        match self.mode.get() {
            Mode::Recursive => {
                let half = (w / 2) as f64;
                let arg = |t: f64| (t - half) / (scale * sample_rate);
                let pad_length =
                    (self.padding.get() * self.e_folding_time() * sample_rate) as i64;

                let mut prepad = Complex::new(0.0, 0.0);
                for t in -pad_length..0 {
                    prepad += self.phi(arg(t as f64)).conj();
                }
                let mut postpad = Complex::new(0.0, 0.0);
                for t in w as i64..w as i64 + pad_length {
                    postpad += self.phi(arg(t as f64)).conj();
                }
                for (t, value) in values.iter_mut().enumerate() {
                    *value = self.phi(arg(t as f64));
                }
                self.prepad = prepad;
                self.postpad = postpad;
            }
            Mode::Spectral => {
                // DFT layout: positive frequencies in the lower half. The
                // upper half maps to negative frequencies, where analytic
                // wavelets vanish.
                for (t, value) in values.iter_mut().enumerate() {
                    let s_omega = scale * 2.0 * PI * t as f64 * sample_rate / w as f64;
                    *value = if t < w / 2 {
                        self.phi_spectral(s_omega)
                    } else {
                        self.phi_spectral(-s_omega)
                    };
                }
                self.prepad = Complex::new(0.0, 0.0);
                self.postpad = Complex::new(0.0, 0.0);
            }
        }
        self.values = values;
    }

    /// Write an attribute by name.
    ///
    /// Recognized names: `sample_rate`, `scale`, `window_size`, `mode`,
    /// `delay`, `padding`, and the family-specific `omega0` (Morlet) or
    /// `order` (Paul).
    pub fn set_attr(&mut self, name: &str, value: Value) -> CwtResult<()> {
        match name {
            "sample_rate" => self.set_sample_rate(value.as_real(name)?),
            "scale" => self.set_scale(value.as_real(name)?),
            "window_size" => self.set_window_size(value.as_unsigned(name)?),
            "mode" => match value {
                Value::Mode(mode) => self.set_mode(mode),
                _ => Err(CwtError::TypeMismatch {
                    name: name.to_string(),
                    expected: "mode",
                }),
            },
            "delay" => self.set_delay(value.as_real(name)?),
            "padding" => self.set_padding(value.as_real(name)?),
            "omega0" => match self.kernel {
                Kernel::Morlet { .. } => self.set_omega0(value.as_real(name)?),
                Kernel::Paul { .. } => Err(CwtError::NotFound(name.to_string())),
            },
            "order" => match self.kernel {
                Kernel::Paul { .. } => self.set_order(value.as_unsigned(name)?),
                Kernel::Morlet { .. } => Err(CwtError::NotFound(name.to_string())),
            },
            _ => Err(CwtError::NotFound(name.to_string())),
        }
    }

    /// Read an attribute by name.
    pub fn get_attr(&self, name: &str) -> CwtResult<Value> {
        match name {
            "sample_rate" => Ok(Value::Real(self.sample_rate.get())),
            "scale" => Ok(Value::Real(self.scale.get())),
            "window_size" => Ok(Value::Unsigned(self.window_size.get())),
            "mode" => Ok(Value::Mode(self.mode.get())),
            "delay" => Ok(Value::Real(self.delay.get())),
            "padding" => Ok(Value::Real(self.padding.get())),
            "omega0" => self.omega0().map(Value::Real),
            "order" => self.order().map(Value::Unsigned),
            _ => Err(CwtError::NotFound(name.to_string())),
        }
    }

    /// Human-readable summary of the current configuration.
    pub fn info(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Wavelet:");
        let _ = writeln!(out, "\tSampling rate: {}", self.sample_rate.get());
        let _ = writeln!(out, "\tScale: {}", self.scale.get());
        let _ = writeln!(
            out,
            "\tEquivalent Frequency (Hz): {}",
            self.scale_to_frequency(self.scale.get())
        );
        let _ = writeln!(out, "\tWindow Size: {}", self.window_size.get());
        match &self.kernel {
            Kernel::Morlet { omega0 } => {
                let _ = writeln!(out, "\tType: Morlet");
                let _ = writeln!(out, "\tOmega0 (carrier frequency): {}", omega0.get());
            }
            Kernel::Paul { order } => {
                let _ = writeln!(out, "\tType: Paul");
                let _ = writeln!(out, "\tOrder: {}", order.get());
            }
        }
        out
    }
}

/// `n!` as a float. Exact for the small orders used by the Paul wavelet.
fn factorial(n: usize) -> f64 {
    (2..=n).map(|i| i as f64).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_morlet_construction_defaults() {
        let morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        assert_eq!(morlet.scale(), 2.0 / 100.0);
        assert_eq!(morlet.sample_rate(), 100.0);
        assert_eq!(morlet.mode(), Mode::Recursive);
        assert_eq!(morlet.delay(), DEFAULT_DELAY);
        assert_eq!(morlet.padding(), DEFAULT_PADDING);
        assert_eq!(morlet.omega0().unwrap(), DEFAULT_OMEGA0);
        assert_eq!(morlet.family(), Family::Morlet);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(Wavelet::new(Family::Morlet, 0.0).is_err());
        assert!(Wavelet::new(Family::Paul, -44100.0).is_err());
    }

    #[test]
    fn test_morlet_recursive_values() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_window_size(8).unwrap();

        let expected = [
            (-0.06031253, 0.03910428),
            (0.05977080, -0.16174061),
            (0.09138012, 0.30891188),
            (-0.37550965, -0.28051408),
            (0.53112597, 0.0),
            (-0.37550965, 0.28051408),
            (0.09138012, -0.30891188),
            (0.05977080, 0.16174061),
        ];
        for (value, (re, im)) in morlet.values().iter().zip(expected.iter()) {
            assert_relative_eq!(value.re, *re, epsilon = 1e-4);
            assert_relative_eq!(value.im, *im, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_morlet_window_conjugate_symmetry() {
        // Odd window: values mirror around the center with conjugation
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_window_size(33).unwrap();
        let values = morlet.values();
        for i in 0..16 {
            let left = values[16 - i - 1];
            let right = values[16 + i + 1];
            assert_relative_eq!(left.re, right.re, epsilon = 1e-12);
            assert_relative_eq!(left.im, -right.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_default_window_size_odd_and_min() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_default_window_size().unwrap();
        let w = morlet.window_size();
        assert!(w >= 3);
        assert_eq!(w % 2, 1);

        // A tiny scale collapses to the minimum window
        morlet.set_scale(1e-6).unwrap();
        morlet.set_default_window_size().unwrap();
        assert_eq!(morlet.window_size(), 3);
    }

    #[test]
    fn test_scale_frequency_inverse() {
        let morlet = Wavelet::new(Family::Morlet, 200.0).unwrap();
        for &f in &[0.5, 1.0, 5.0, 20.0, 99.0] {
            let round_trip = morlet.scale_to_frequency(morlet.frequency_to_scale(f));
            assert_relative_eq!(round_trip, f, max_relative = 1e-12);
        }
        let paul = Wavelet::new(Family::Paul, 200.0).unwrap();
        for &f in &[0.5, 1.0, 5.0, 20.0, 99.0] {
            let round_trip = paul.scale_to_frequency(paul.frequency_to_scale(f));
            assert_relative_eq!(round_trip, f, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_e_folding_times() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_scale(0.5).unwrap();
        assert_relative_eq!(morlet.e_folding_time(), SQRT_2 * 0.5, epsilon = 1e-15);

        let mut paul = Wavelet::new(Family::Paul, 100.0).unwrap();
        paul.set_scale(0.5).unwrap();
        assert_relative_eq!(paul.e_folding_time(), 0.5 / SQRT_2, epsilon = 1e-15);
    }

    #[test]
    fn test_paul_defaults_and_order() {
        let mut paul = Wavelet::new(Family::Paul, 100.0).unwrap();
        assert_eq!(paul.order().unwrap(), DEFAULT_PAUL_ORDER);
        assert!(paul.omega0().is_err());
        paul.set_order(4).unwrap();
        assert_eq!(paul.order().unwrap(), 4);
        assert!(paul.set_order(0).is_err());
    }

    #[test]
    fn test_paul_phi_decays() {
        let paul = Wavelet::new(Family::Paul, 100.0).unwrap();
        let center = paul.phi(0.0).norm();
        let tail = paul.phi(10.0).norm();
        assert!(center > tail * 100.0, "center {center} vs tail {tail}");
    }

    #[test]
    fn test_spectral_mode_analytic() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_window_size(64).unwrap();
        morlet.set_mode(Mode::Spectral).unwrap();
        let values = morlet.values();
        assert_eq!(values.len(), 64);
        // Negative-frequency half is identically zero for analytic wavelets
        for value in &values[32..] {
            assert_eq!(*value, Complex::new(0.0, 0.0));
        }
        // DC is zero as well: phi_spectral(0) = 0
        assert_eq!(values[0], Complex::new(0.0, 0.0));
        // Some positive-frequency energy exists
        assert!(values[1..32].iter().any(|v| v.norm() > 0.0));
    }

    #[test]
    fn test_mode_round_trip_restores_values() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_window_size(9).unwrap();
        let recursive = morlet.values().to_vec();
        morlet.set_mode(Mode::Spectral).unwrap();
        morlet.set_mode(Mode::Recursive).unwrap();
        for (a, b) in morlet.values().iter().zip(recursive.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_padding_scalars_nonzero() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_scale(0.1).unwrap();
        morlet.set_default_window_size().unwrap();
        assert!(morlet.prepad().norm() > 0.0);
        assert!(morlet.postpad().norm() > 0.0);

        // Zero padding removes the boundary correction entirely
        morlet.set_padding(0.0).unwrap();
        assert_eq!(morlet.prepad(), Complex::new(0.0, 0.0));
        assert_eq!(morlet.postpad(), Complex::new(0.0, 0.0));
    }

    #[test]
    fn test_attr_dispatch() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_attr("delay", Value::Real(2.0)).unwrap();
        assert_eq!(morlet.get_attr("delay").unwrap(), Value::Real(2.0));
        morlet.set_attr("omega0", Value::Real(6.0)).unwrap();
        assert_eq!(morlet.get_attr("omega0").unwrap(), Value::Real(6.0));

        assert!(matches!(
            morlet.set_attr("order", Value::Unsigned(3)),
            Err(CwtError::NotFound(_))
        ));
        assert!(matches!(
            morlet.set_attr("delay", Value::Bool(true)),
            Err(CwtError::TypeMismatch { .. })
        ));
        assert!(matches!(
            morlet.set_attr("nonsense", Value::Real(1.0)),
            Err(CwtError::NotFound(_))
        ));
    }

    #[test]
    fn test_rejected_write_keeps_kernel() {
        let mut morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        morlet.set_window_size(9).unwrap();
        let before = morlet.values().to_vec();
        assert!(morlet.set_delay(-1.0).is_err());
        assert_eq!(morlet.delay(), DEFAULT_DELAY);
        for (a, b) in morlet.values().iter().zip(before.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(4), 24.0);
        assert_eq!(factorial(6), 720.0);
    }

    #[test]
    fn test_info_mentions_family() {
        let morlet = Wavelet::new(Family::Morlet, 100.0).unwrap();
        assert!(morlet.info().contains("Morlet"));
        let paul = Wavelet::new(Family::Paul, 100.0).unwrap();
        assert!(paul.info().contains("Paul"));
    }
}
