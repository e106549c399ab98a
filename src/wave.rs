// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

use log::debug;

/// A buffer of signed 16 bit samples, interleaved frame by frame.
///
/// For two channels, samples `0` and `1` form the first frame,
/// `2` and `3` the second and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    channels: usize,
    sample_rate: u32,
    samples: Vec<i16>,
}

#[allow(clippy::len_without_is_empty)]
impl Wave {
    /// Wrap interleaved samples.
    ///
    /// # Panics
    ///
    /// If `channels` is zero or the samples do not fill a whole number of frames.
    pub fn new(channels: usize, sample_rate: u32, samples: Vec<i16>) -> Self {
        assert!(channels > 0, "a wave needs at least one channel");
        assert_eq!(samples.len() % channels, 0, "incomplete frame");
        Self {
            channels,
            sample_rate,
            samples,
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of frames per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// All samples of all channels, interleaved.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of samples over all channels.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Number of frames, i.e. samples per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// The samples of every channel at the given time index.
    pub fn frame(&self, index: usize) -> Option<&[i16]> {
        self.samples
            .get(index * self.channels..(index + 1) * self.channels)
    }

    /// Playing time of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Cut off the trailing run of strictly positive samples so that the wave ends
    /// close to a zero crossing, avoiding a click when it is looped or stopped.
    ///
    /// The frame containing the last non-positive sample is kept whole.
    /// A wave without any non-positive sample is left untouched.
    /// Returns the number of samples that were removed.
    ///
    /// ```
    /// use gentone::wave::Wave;
    ///
    /// let mut wave = Wave::new(1, 8, vec![0, 5, 3, -2, 4, 7]);
    /// assert_eq!(wave.trim_tail(), 2);
    /// assert_eq!(wave.samples(), &[0, 5, 3, -2]);
    /// ```
    pub fn trim_tail(&mut self) -> usize {
        let last_crossing = match self.samples.iter().rposition(|&s| s <= 0) {
            Some(index) => index,
            None => return 0,
        };
        let keep = (last_crossing / self.channels + 1) * self.channels;
        let removed = self.samples.len() - keep;
        self.samples.truncate(keep);
        debug!("trimmed {} samples from the end of the wave", removed);
        removed
    }

    /// Size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * std::mem::size_of::<i16>()
    }

    /// Copy the samples to bytes in little endian order, keeping the interleaving.
    ///
    /// Returns the number of samples that were actually copied.
    /// Might be less than the number of samples if the output buffer was not large enough.
    pub fn copy_bytes_to(&self, bytes: &mut [u8]) -> usize {
        let mut processed = 0;
        for (sample, target) in self.samples.iter().zip(bytes.chunks_exact_mut(2)) {
            target.copy_from_slice(&sample.to_le_bytes());
            processed += 1;
        }
        processed
    }

    /// The whole buffer as little endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.byte_len()];
        self.copy_bytes_to(&mut bytes);
        bytes
    }
}
