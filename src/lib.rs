//! # Streaming Continuous Wavelet Transform
//!
//! This crate provides an online, minimal-delay estimator of the Continuous
//! Wavelet Transform (CWT). Samples are fed one at a time at a fixed rate;
//! for every input sample the engine emits a complex scalogram slice, one
//! coefficient per frequency band. Bands are logarithmically distributed
//! between a minimum and maximum frequency at a configurable number of bands
//! per octave.
//!
//! ## Overview
//!
//! The streaming estimator is built as a wavelet filterbank:
//!
//! - **Kernels**: complex Morlet (Gabor) and Paul wavelets, materialized in
//!   the time domain for streaming or the frequency domain for batch work
//! - **Multi-rate windows**: per-band decimation with shared sliding windows
//!   and Chebyshev Type-I anti-aliasing filters, designed from scratch
//! - **Boundary correction**: pre/post padding scalars anchor the window
//!   edges so each band sees the correct tail energy from the first frame
//!
//! An offline FFT path computes the full scalogram of a complete signal for
//! reference and validation.
//!
//! ## Signal Flow
//!
//! ```text
//! sample ─> ring buffer per rate ─> anti-alias IIR (rate > 1)
//!        ─> inner product with conj(kernel) per band
//!        ─> complex coefficient + power per band
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cwt_bank::{Filterbank, Optimisation};
//!
//! // 20 bands between 1 Hz and 30 Hz at 100 Hz sampling
//! let mut fb = Filterbank::new(100.0, 1.0, 30.0, 4.0).unwrap();
//! fb.set_optimisation(Optimisation::Standard2).unwrap();
//!
//! for i in 0..200 {
//!     let sample = (2.0 * std::f64::consts::PI * 8.0 * i as f64 / 100.0).sin();
//!     fb.update(sample);
//! }
//!
//! // Latest scalogram slice: one complex coefficient per band
//! let slice = fb.result_complex();
//! assert_eq!(slice.len(), fb.size());
//! ```

pub mod attribute;
pub mod fft_utils;
pub mod filterbank;
pub mod lowpass;
pub mod ringbuffer;
pub mod types;
pub mod wavelet;

// Re-export main types
pub use attribute::Attribute;
pub use filterbank::{Filterbank, Optimisation};
pub use lowpass::LowpassFilter;
pub use ringbuffer::WindowBuffer;
pub use types::{Complex, CwtError, CwtResult, Sample, Value};
pub use wavelet::{Family, Mode, Wavelet};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::filterbank::{Filterbank, Optimisation};
    pub use crate::types::{Complex, CwtError, CwtResult, Value};
    pub use crate::wavelet::{Family, Mode, Wavelet};
}
