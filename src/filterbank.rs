//! Minimal-delay wavelet filterbank
//!
//! Online scalogram estimation: for every input sample, the filterbank emits
//! one complex coefficient per frequency band. Bands are logarithmically
//! spaced between a minimum and maximum frequency at a configurable number
//! of bands per octave.
//!
//! ## Signal flow
//!
//! ```text
//! sample ─> ring buffer(s) ─> [anti-alias IIR per rate] ─> per-band inner
//!           product against the conjugated kernel ─> complex coefficient
//!           ─> [/ sqrt(scale)] ─> * sqrt(decimation)
//! ```
//!
//! A reference kernel holds the parameters shared by every band; per-band
//! kernels differ only in scale and, when decimation is enabled, in sample
//! rate. Bands associated with the same decimation rate share one sliding
//! window, and each rate above 1 owns a Chebyshev low-pass filter that feeds
//! it.
//!
//! ## Optimisation levels
//!
//! Decimation targets `sample_rate / 8` (`Standard1`/`Aggressive1`) or
//! `sample_rate / 4` (`Standard2`/`Aggressive2`) per band frequency. The
//! Aggressive levels additionally skip a band's inner product on frames that
//! are not multiples of its rate, holding the previous coefficient.
//!
//! ## Example
//!
//! ```rust
//! use cwt_bank::filterbank::Filterbank;
//!
//! let mut fb = Filterbank::new(100.0, 1.0, 30.0, 4.0).unwrap();
//! assert_eq!(fb.size(), 20);
//! for i in 0..100 {
//!     fb.update((i as f64 * 0.5).sin());
//! }
//! let power = fb.result_power();
//! assert_eq!(power.len(), 20);
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;
use crate::fft_utils::FftProcessor;
use crate::lowpass::LowpassFilter;
use crate::ringbuffer::WindowBuffer;
use crate::types::{Complex, CwtError, CwtResult, Value};
use crate::wavelet::{Family, Mode, Wavelet};

/// Default wavelet family.
pub const DEFAULT_FAMILY: Family = Family::Morlet;

/// Optimisation level of the filterbank implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Optimisation {
    /// No optimisation (no band decimation)
    None,
    /// Band decimation targeting sample_rate / 8, all frames computed
    Standard1,
    /// Band decimation targeting sample_rate / 4, all frames computed
    Standard2,
    /// Band decimation targeting sample_rate / 8, off-rate frames skipped
    Aggressive1,
    /// Band decimation targeting sample_rate / 4, off-rate frames skipped
    Aggressive2,
}

/// Minimal-delay wavelet filterbank for online scalogram estimation.
///
/// Owns every band kernel, sliding window and anti-alias filter. Any
/// accepted configuration change triggers a full rebuild; a rejected one
/// leaves the filterbank untouched.
#[derive(Debug, Clone)]
pub struct Filterbank {
    /// Minimum frequency of the filterbank (Hz)
    frequency_min: Attribute<f64>,
    /// Maximum frequency of the filterbank (Hz)
    frequency_max: Attribute<f64>,
    /// Number of bands per octave
    bands_per_octave: Attribute<f64>,
    /// Optimisation level
    optimisation: Attribute<Optimisation>,
    /// Wavelet family
    family: Attribute<Family>,
    /// Divide each coefficient by the square root of its band's scale
    rescale: Attribute<bool>,
    /// Reference kernel carrying the parameters shared by all bands
    reference: Wavelet,
    /// Per-band kernels, ordered by increasing scale
    wavelets: Vec<Wavelet>,
    /// Scale of each band
    scales: Vec<f64>,
    /// Equivalent Fourier frequency of each band
    frequencies: Vec<f64>,
    /// Decimation factor of each band (empty when optimisation is None)
    downsampling_factors: Vec<usize>,
    /// Sliding windows, one per decimation rate
    data: BTreeMap<usize, WindowBuffer>,
    /// Anti-alias filters, one per decimation rate above 1
    filters: BTreeMap<usize, LowpassFilter>,
    /// Latest scalogram slice
    result_complex: Vec<Complex>,
    /// Latest power slice
    result_power: Vec<f64>,
    /// Frame counter driving the Aggressive frame skip
    frame_index: u64,
}

impl Filterbank {
    /// Create a filterbank.
    ///
    /// # Arguments
    /// * `sample_rate` - Sampling rate of the input stream (Hz)
    /// * `frequency_min` - Lowest band frequency (Hz)
    /// * `frequency_max` - Highest band frequency (Hz), at most Nyquist
    /// * `bands_per_octave` - Number of bands per octave
    pub fn new(
        sample_rate: f64,
        frequency_min: f64,
        frequency_max: f64,
        bands_per_octave: f64,
    ) -> CwtResult<Self> {
        let mut filterbank = Self {
            frequency_min: Attribute::with_limits(frequency_min, 1e-12, frequency_max)?,
            frequency_max: Attribute::with_limits(frequency_max, frequency_min, sample_rate / 2.0)?,
            bands_per_octave: Attribute::with_min(bands_per_octave, 1.0)?,
            optimisation: Attribute::with_limits(
                Optimisation::None,
                Optimisation::None,
                Optimisation::Aggressive2,
            )?,
            family: Attribute::with_limits(DEFAULT_FAMILY, Family::Morlet, Family::Paul)?,
            rescale: Attribute::new(true),
            reference: Wavelet::new(DEFAULT_FAMILY, sample_rate)?,
            wavelets: Vec::new(),
            scales: Vec::new(),
            frequencies: Vec::new(),
            downsampling_factors: Vec::new(),
            data: BTreeMap::new(),
            filters: BTreeMap::new(),
            result_complex: Vec::new(),
            result_power: Vec::new(),
            frame_index: 0,
        };
        filterbank.init()?;
        Ok(filterbank)
    }

    /// Number of frequency bands.
    pub fn size(&self) -> usize {
        self.wavelets.len()
    }

    /// Sampling rate of the input stream.
    pub fn sample_rate(&self) -> f64 {
        self.reference.sample_rate()
    }

    /// Lowest band frequency (Hz).
    pub fn frequency_min(&self) -> f64 {
        self.frequency_min.get()
    }

    /// Highest band frequency (Hz).
    pub fn frequency_max(&self) -> f64 {
        self.frequency_max.get()
    }

    /// Number of bands per octave.
    pub fn bands_per_octave(&self) -> f64 {
        self.bands_per_octave.get()
    }

    /// Active wavelet family.
    pub fn family(&self) -> Family {
        self.family.get()
    }

    /// Active optimisation level.
    pub fn optimisation(&self) -> Optimisation {
        self.optimisation.get()
    }

    /// Whether coefficients are divided by the square root of their scale.
    pub fn rescale(&self) -> bool {
        self.rescale.get()
    }

    /// Scale of each band, strictly increasing.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Equivalent Fourier frequency of each band, strictly decreasing.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Decimation factor of each band. Empty when optimisation is None.
    pub fn downsampling_factors(&self) -> &[usize] {
        &self.downsampling_factors
    }

    /// Latest scalogram slice, one complex coefficient per band.
    pub fn result_complex(&self) -> &[Complex] {
        &self.result_complex
    }

    /// Latest power slice, one squared magnitude per band.
    pub fn result_power(&self) -> &[f64] {
        &self.result_power
    }

    /// Per-band kernels, ordered by increasing scale.
    pub fn wavelets(&self) -> &[Wavelet] {
        &self.wavelets
    }

    /// Group delay of each band in input samples.
    pub fn delays_in_samples(&self) -> Vec<usize> {
        let sample_rate = self.reference.sample_rate();
        let optimised = self.optimisation.get() != Optimisation::None;
        self.wavelets
            .iter()
            .enumerate()
            .map(|(band, wavelet)| {
                let mut delay =
                    (wavelet.delay() * wavelet.e_folding_time() * sample_rate) as usize;
                if optimised && self.downsampling_factors[band] > 1 {
                    delay += self.downsampling_factors[band];
                }
                delay
            })
            .collect()
    }

    /// Set the lowest band frequency, tightening the lower bound of the
    /// highest one.
    pub fn set_frequency_min(&mut self, frequency_min: f64) -> CwtResult<()> {
        self.frequency_min.set(frequency_min)?;
        self.frequency_max.set_limit_min(frequency_min);
        self.init()
    }

    /// Set the highest band frequency, tightening the upper bound of the
    /// lowest one.
    pub fn set_frequency_max(&mut self, frequency_max: f64) -> CwtResult<()> {
        self.frequency_max.set(frequency_max)?;
        self.frequency_min.set_limit_max(frequency_max);
        self.init()
    }

    /// Set the number of bands per octave.
    pub fn set_bands_per_octave(&mut self, bands_per_octave: f64) -> CwtResult<()> {
        self.bands_per_octave.set(bands_per_octave)?;
        self.init()
    }

    /// Switch the wavelet family. Family-specific parameters reset to their
    /// defaults; the sampling rate is carried over.
    pub fn set_family(&mut self, family: Family) -> CwtResult<()> {
        self.family.set(family)?;
        self.reference = Wavelet::new(family, self.reference.sample_rate())?;
        self.init()
    }

    /// Set the optimisation level.
    pub fn set_optimisation(&mut self, optimisation: Optimisation) -> CwtResult<()> {
        self.optimisation.set(optimisation)?;
        self.init()
    }

    /// Toggle per-scale rescaling of the coefficients.
    pub fn set_rescale(&mut self, rescale: bool) -> CwtResult<()> {
        self.rescale.set(rescale)?;
        self.init()
    }

    /// Set the sampling rate, widening the admissible range of
    /// `frequency_max` up to the new Nyquist frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> CwtResult<()> {
        self.reference.set_sample_rate(sample_rate)?;
        self.frequency_max.set_limit_max(sample_rate / 2.0);
        self.init()
    }

    /// Write an attribute by name.
    ///
    /// Names that are not filterbank-level (`frequency_min`, `frequency_max`,
    /// `bands_per_octave`, `family`, `optimisation`, `rescale`) are forwarded
    /// to the reference kernel, except `scale` and `window_size`, which are
    /// derived per band and fail with [`CwtError::NotFound`].
    pub fn set_attribute(&mut self, name: &str, value: Value) -> CwtResult<()> {
        match name {
            "frequency_min" => self.set_frequency_min(value.as_real(name)?),
            "frequency_max" => self.set_frequency_max(value.as_real(name)?),
            "bands_per_octave" => self.set_bands_per_octave(value.as_real(name)?),
            "family" => match value {
                Value::Family(family) => self.set_family(family),
                _ => Err(CwtError::TypeMismatch {
                    name: name.to_string(),
                    expected: "family",
                }),
            },
            "optimisation" => match value {
                Value::Optimisation(optimisation) => self.set_optimisation(optimisation),
                _ => Err(CwtError::TypeMismatch {
                    name: name.to_string(),
                    expected: "optimisation",
                }),
            },
            "rescale" => self.set_rescale(value.as_bool(name)?),
            "sample_rate" => self.set_sample_rate(value.as_real(name)?),
            "scale" | "window_size" => Err(CwtError::NotFound(name.to_string())),
            _ => {
                self.reference.set_attr(name, value)?;
                self.init()
            }
        }
    }

    /// Read an attribute by name.
    pub fn get_attribute(&self, name: &str) -> CwtResult<Value> {
        match name {
            "frequency_min" => Ok(Value::Real(self.frequency_min.get())),
            "frequency_max" => Ok(Value::Real(self.frequency_max.get())),
            "bands_per_octave" => Ok(Value::Real(self.bands_per_octave.get())),
            "family" => Ok(Value::Family(self.family.get())),
            "optimisation" => Ok(Value::Optimisation(self.optimisation.get())),
            "rescale" => Ok(Value::Bool(self.rescale.get())),
            "scale" | "window_size" => Err(CwtError::NotFound(name.to_string())),
            _ => self.reference.get_attr(name),
        }
    }

    /// Human-readable summary of the current configuration.
    pub fn info(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Wavelet Filterbank:");
        let _ = writeln!(
            out,
            "\tFrequency Range: {} {}",
            self.frequency_min.get(),
            self.frequency_max.get()
        );
        let _ = writeln!(out, "\tBands per Octave: {}", self.bands_per_octave.get());
        let _ = writeln!(out, "\tOptimisation: {:?}", self.optimisation.get());
        if !self.wavelets.is_empty() {
            out.push_str(&self.reference.info());
        }
        out
    }

    /// Rebuild every band, window and filter from the current attributes.
    fn init(&mut self) -> CwtResult<()> {
        let sample_rate = self.reference.sample_rate();
        let bands_per_octave = self.bands_per_octave.get();
        let optimisation = self.optimisation.get();

        // Band enumeration on a logarithmic scale grid anchored at 2 / fs
        let scale_0 = 2.0 / sample_rate;
        let min_scale = self.reference.frequency_to_scale(self.frequency_max.get());
        let max_scale = self.reference.frequency_to_scale(self.frequency_min.get());
        let min_index = 1 + ((min_scale / scale_0).log2() * bands_per_octave) as i64;
        let max_index = 1 + ((max_scale / scale_0).log2() * bands_per_octave) as i64;
        let band_count = max_index.saturating_sub(min_index).max(0) as usize;

        self.scales = (0..band_count)
            .map(|i| scale_0 * 2.0_f64.powf((min_index + i as i64) as f64 / bands_per_octave))
            .collect();
        self.frequencies = self
            .scales
            .iter()
            .map(|&scale| self.reference.scale_to_frequency(scale))
            .collect();

        // Decimation factors
        self.downsampling_factors.clear();
        if optimisation != Optimisation::None {
            let divisor = match optimisation {
                Optimisation::Standard1 | Optimisation::Aggressive1 => 8.0,
                _ => 4.0,
            };
            self.downsampling_factors = self
                .frequencies
                .iter()
                .map(|&frequency| {
                    let target_rate = (sample_rate / divisor) / frequency;
                    (target_rate as i64).max(1) as usize
                })
                .collect();
        }

        // Per-band kernels: clones of the reference at each scale, running
        // at the decimated rate where applicable
        self.wavelets.clear();
        self.wavelets.reserve(band_count);
        for band in 0..band_count {
            let mut wavelet = self.reference.clone();
            if optimisation != Optimisation::None {
                wavelet
                    .set_sample_rate(sample_rate / self.downsampling_factors[band] as f64)?;
            }
            wavelet.set_scale(self.scales[band])?;
            wavelet.set_default_window_size()?;
            self.wavelets.push(wavelet);
        }

        // Sliding windows and anti-alias filters, keyed by decimation rate
        self.data.clear();
        self.filters.clear();
        if optimisation == Optimisation::None {
            if let Some(widest) = self.wavelets.last() {
                self.data
                    .insert(1, WindowBuffer::with_capacity(widest.window_size()));
            }
        } else {
            let mut capacities: BTreeMap<usize, usize> = BTreeMap::new();
            for (band, wavelet) in self.wavelets.iter().enumerate() {
                let factor = self.downsampling_factors[band];
                let capacity = wavelet.window_size() * factor;
                let entry = capacities.entry(factor).or_insert(0);
                *entry = (*entry).max(capacity);
            }
            for (&factor, &capacity) in &capacities {
                self.data.insert(factor, WindowBuffer::with_capacity(capacity));
                if factor > 1 {
                    self.filters
                        .insert(factor, LowpassFilter::with_cutoff(0.8 / factor as f64)?);
                }
            }
        }

        self.result_complex = vec![Complex::new(0.0, 0.0); band_count];
        self.result_power = vec![0.0; band_count];
        self.frame_index = 0;
        Ok(())
    }

    /// Feed one sample, updating every band's coefficient.
    ///
    /// The first push into an empty window primes it: the window fills to
    /// capacity with the current sample so the inner product sees a stable
    /// boundary from the very first frame. A decimated window additionally
    /// warms its anti-alias filter over two window lengths before priming.
    pub fn update(&mut self, value: f64) {
        // Fill the windows in rate-ascending order
        if let Some(buffer) = self.data.get_mut(&1) {
            if buffer.is_empty() {
                for _ in 0..2 * buffer.capacity() - 1 {
                    buffer.push(value);
                }
            } else {
                buffer.push(value);
            }
        }
        let optimisation = self.optimisation.get();
        if optimisation != Optimisation::None {
            for (rate, filter) in self.filters.iter_mut() {
                let buffer = match self.data.get_mut(rate) {
                    Some(buffer) => buffer,
                    None => continue,
                };
                let mut filtered_value = filter.filter(value);
                if buffer.is_empty() {
                    for _ in 0..2 * buffer.capacity() - 1 {
                        filtered_value = filter.filter(value);
                    }
                    for _ in 0..2 * buffer.capacity() - 1 {
                        buffer.push(filtered_value);
                    }
                } else {
                    buffer.push(filtered_value);
                }
            }
        }

        // Per-band inner product against the conjugated kernel
        let aggressive = matches!(
            optimisation,
            Optimisation::Aggressive1 | Optimisation::Aggressive2
        );
        let rescale = self.rescale.get();
        for (band, wavelet) in self.wavelets.iter().enumerate() {
            let rate = if optimisation == Optimisation::None {
                1
            } else {
                self.downsampling_factors[band]
            };
            if aggressive && self.frame_index % rate as u64 != 0 {
                // The previous coefficient persists until the next on-rate frame
                continue;
            }
            let buffer = match self.data.get(&rate) {
                Some(buffer) => buffer,
                None => continue,
            };
            let window = wavelet.window_size();
            let len = buffer.len();

            let mut coefficient = Complex::new(buffer[0], 0.0) * wavelet.prepad();
            let mut index = len - rate * window;
            for kernel_value in wavelet.values() {
                coefficient += buffer[index] * kernel_value.conj();
                index += rate;
            }
            coefficient += buffer[len - 1] * wavelet.postpad();

            if rescale {
                coefficient /= wavelet.scale().sqrt();
            }
            coefficient *= (rate as f64).sqrt();
            self.result_complex[band] = coefficient;
            self.result_power[band] = coefficient.norm_sqr();
        }
        self.frame_index += 1;
    }

    /// Clear every window, filter memory and the frame counter. Capacities
    /// and coefficients are untouched; nothing is reallocated.
    pub fn reset(&mut self) {
        for buffer in self.data.values_mut() {
            buffer.clear();
        }
        for filter in self.filters.values_mut() {
            filter.reset();
        }
        self.frame_index = 0;
    }

    /// Offline scalogram of a complete signal through the FFT path.
    ///
    /// Each band's kernel is flipped to the spectral domain at the signal's
    /// length, multiplied against the signal spectrum and transformed back,
    /// then restored. Returns the scalogram as `values.len()` rows of
    /// `size()` coefficients.
    pub fn process(&mut self, values: &[f64]) -> CwtResult<Vec<Vec<Complex>>> {
        if values.is_empty() {
            return Err(CwtError::Invalid("cannot process an empty signal".to_string()));
        }
        let length = values.len();
        let mut fft = FftProcessor::new(length);
        let spectrum = fft.fft_real(values);
        let rescale = self.rescale.get();

        let mut scalogram = vec![vec![Complex::new(0.0, 0.0); self.size()]; length];
        for band in 0..self.size() {
            let previous_window = self.wavelets[band].window_size();
            self.wavelets[band].set_mode(Mode::Spectral)?;
            self.wavelets[band].set_window_size(length)?;

            let mut column: Vec<Complex> = spectrum
                .iter()
                .zip(self.wavelets[band].values())
                .map(|(signal_bin, kernel_bin)| signal_bin * kernel_bin)
                .collect();
            fft.ifft_inplace(&mut column);
            if rescale {
                let norm = self.wavelets[band].scale().sqrt();
                for value in column.iter_mut() {
                    *value /= norm;
                }
            }
            for (t, value) in column.into_iter().enumerate() {
                scalogram[t][band] = value;
            }

            self.wavelets[band].set_window_size(previous_window)?;
            self.wavelets[band].set_mode(Mode::Recursive)?;
        }
        Ok(scalogram)
    }

    /// Batch scalogram through the streaming path: resets, then feeds the
    /// signal sample by sample. The group delay of each band is intact.
    pub fn process_online(&mut self, values: &[f64]) -> Vec<Vec<Complex>> {
        self.reset();
        let mut scalogram = Vec::with_capacity(values.len());
        for &value in values {
            self.update(value);
            scalogram.push(self.result_complex.clone());
        }
        scalogram
    }
}
