//! Offline measurement of filter responses.
//!
//! Feed a unit impulse through a processor, take a rectangular-window FFT of
//! the response and read magnitudes off it. Everything here allocates and
//! runs in double precision; it is for tests, benches and the probe binary,
//! never the audio thread.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Level in decibels of a linear magnitude.
#[inline]
pub fn db(magnitude: f64) -> f64 {
    20.0 * magnitude.log10()
}

/// Unit impulse at index 0 followed by `len - 1` zeros.
pub fn dirac(len: usize) -> Vec<f32> {
    let mut signal = vec![0.0; len];
    if let Some(first) = signal.first_mut() {
        *first = 1.0;
    }
    signal
}

/// Run `process` over a unit impulse and collect its output.
pub fn impulse_response<F: FnMut(f32) -> f32>(len: usize, process: F) -> Vec<f32> {
    dirac(len).into_iter().map(process).collect()
}

/// Nudge `freq` down so a whole number of periods fits in `size` samples,
/// which puts it exactly on an FFT bin.
pub fn make_even_period(freq: f64, sample_rate: f64, size: usize) -> f64 {
    let period = sample_rate / freq;
    let periods = (size as f64 / period).floor();
    sample_rate / (size as f64 / periods)
}

/// Forward FFT of a fixed size, reusable across many responses.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex<f64>>,
    sample_rate: f64,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        log::debug!("planned {fft_size}-point FFT at {sample_rate} Hz");

        Self {
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            sample_rate: sample_rate as f64,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.scratch.len()
    }

    /// Magnitude spectrum of `signal`, zero-padded or truncated to the FFT
    /// size.
    pub fn analyze(&mut self, signal: &[f32]) -> Spectrum {
        for (i, bin) in self.scratch.iter_mut().enumerate() {
            bin.re = signal.get(i).copied().unwrap_or(0.0) as f64;
            bin.im = 0.0;
        }
        self.fft.process(&mut self.scratch);

        Spectrum {
            magnitudes: self.scratch.iter().map(|c| c.norm()).collect(),
            sample_rate: self.sample_rate,
        }
    }
}

/// Full (two-sided) magnitude spectrum of one response.
#[derive(Debug, Clone)]
pub struct Spectrum {
    magnitudes: Vec<f64>,
    sample_rate: f64,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        self.sample_rate / self.len() as f64
    }

    /// Bin containing `freq`, truncating.
    pub fn freq_to_bin(&self, freq: f64) -> usize {
        (freq / self.sample_rate * self.len() as f64) as usize
    }

    pub fn bin_to_freq(&self, bin: usize) -> f64 {
        bin as f64 * self.bin_width()
    }

    pub fn magnitude(&self, bin: usize) -> f64 {
        self.magnitudes.get(bin).copied().unwrap_or(0.0)
    }

    pub fn magnitude_db(&self, bin: usize) -> f64 {
        db(self.magnitude(bin))
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Loudest bin from DC to Nyquist. Ties go to the lower bin.
    pub fn peak_bin(&self) -> usize {
        let half = self.len() / 2;
        let mut peak = 0;
        for bin in 1..=half.min(self.len().saturating_sub(1)) {
            if self.magnitudes[bin] > self.magnitudes[peak] {
                peak = bin;
            }
        }
        peak
    }

    /// dB/octave between `freq` and two octaves above it.
    pub fn slope_lowpass(&self, freq: f64) -> f64 {
        let bin = self.freq_to_bin(freq);
        (self.magnitude_db(bin * 4) - self.magnitude_db(bin)) / 2.0
    }

    /// dB/octave between `freq` and two octaves below it.
    pub fn slope_highpass(&self, freq: f64) -> f64 {
        let bin = self.freq_to_bin(freq);
        (self.magnitude_db(bin / 4) - self.magnitude_db(bin)) / 2.0
    }
}
