//! FFT utilities for the offline scalogram path
//!
//! Thin wrapper over `rustfft` that plans forward and inverse transforms of
//! a fixed size once and reuses a scratch buffer across calls. The inverse
//! transform is normalized by `1/N` so that `ifft(fft(x)) == x`.

use std::fmt;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};

use crate::types::Complex;

/// Planned forward/inverse FFT pair of a fixed size.
pub struct FftProcessor {
    /// Transform size
    size: usize,
    /// Forward FFT instance
    fft_forward: Arc<dyn Fft<f64>>,
    /// Inverse FFT instance
    fft_inverse: Arc<dyn Fft<f64>>,
    /// Scratch buffer shared by both directions
    scratch: Vec<Complex>,
}

impl fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftProcessor")
            .field("size", &self.size)
            .finish()
    }
}

impl FftProcessor {
    /// Plan transforms for the given size.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(size);
        let fft_inverse = planner.plan_fft_inverse(size);
        let scratch_len = fft_forward
            .get_inplace_scratch_len()
            .max(fft_inverse.get_inplace_scratch_len());
        let scratch = vec![Complex::new(0.0, 0.0); scratch_len];

        Self {
            size,
            fft_forward,
            fft_inverse,
            scratch,
        }
    }

    /// Transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward FFT of a real signal. The input is zero-padded or truncated
    /// to the transform size.
    pub fn fft_real(&mut self, input: &[f64]) -> Vec<Complex> {
        let mut buffer: Vec<Complex> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));
        self.fft_inplace(&mut buffer);
        buffer
    }

    /// Forward FFT in place.
    pub fn fft_inplace(&mut self, buffer: &mut [Complex]) {
        assert_eq!(buffer.len(), self.size);
        self.fft_forward
            .process_with_scratch(buffer, &mut self.scratch);
    }

    /// Inverse FFT in place, normalized by `1/N`.
    pub fn ifft_inplace(&mut self, buffer: &mut [Complex]) {
        assert_eq!(buffer.len(), self.size);
        self.fft_inverse
            .process_with_scratch(buffer, &mut self.scratch);
        let norm = 1.0 / self.size as f64;
        for value in buffer.iter_mut() {
            *value *= norm;
        }
    }
}
