//! Shape normalization of generation output.
//!
//! Families return tensors of whatever rank their library produces
//! (`[1, 1, samples]`, `[1, samples]`, ...), sometimes wrapped in an object
//! exposing `.audio`. Everything is flattened to a 1-D sample array here.
//! Samples are never resampled or rescaled.

use crate::types::AudioData;
use ndarray::{Array1, ArrayD};

/// Wrapped generation output exposing the audio tensor as `.audio`.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    pub audio: ArrayD<f32>,
}

/// Raw output of a per-family synthesizer.
#[derive(Debug, Clone)]
pub enum RawOutput {
    /// Plain generation tensor
    Tensor(ArrayD<f32>),
    /// Object carrying the tensor in `.audio`
    Wrapped(ModelOutput),
    /// Ordered chunks from a streaming pipeline
    Chunks(Vec<ArrayD<f32>>),
}

/// Normalized 1-D waveform with the sample rate of the model that made it.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Array1<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.samples.len() as f64 / self.sample_rate as f64 * 1000.0) as u64
    }

    pub fn into_audio_data(self) -> AudioData {
        AudioData {
            samples: self.samples.to_vec(),
            channels: 1,
            sample_rate: self.sample_rate,
        }
    }
}

/// Flatten raw output to one dimension.
///
/// The result length is the product of every dimension of the input, which
/// equals the product of its non-unit dimensions.
pub fn normalize(raw: RawOutput) -> Array1<f32> {
    match raw {
        RawOutput::Tensor(tensor) => squeeze(&tensor),
        RawOutput::Wrapped(output) => squeeze(&output.audio),
        RawOutput::Chunks(chunks) => {
            let total = chunks.iter().map(|chunk| chunk.len()).sum();
            let mut samples = Vec::with_capacity(total);
            for chunk in &chunks {
                samples.extend(chunk.iter().copied());
            }
            Array1::from_vec(samples)
        }
    }
}

/// Drop every unit-length axis; remaining axes are flattened row-major.
pub(crate) fn squeeze(tensor: &ArrayD<f32>) -> Array1<f32> {
    tensor.iter().copied().collect()
}
