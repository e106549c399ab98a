// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This namespace contains all the parts converting a tone description to wave data.

pub mod oscillator;

pub use oscillator::{WaveShape, MAX_AMPLITUDE};

use log::debug;

use crate::tone::ToneSpec;
use crate::wave::Wave;

/// Number of frames synthesized for a tone.
/// Tones shorter than a second, including zero length ones, get a full second
/// so there is always something to draw.
pub fn frame_count(spec: &ToneSpec) -> usize {
    (spec.duration.max(1.0) * spec.sample_rate as f64).round() as usize
}

/// Sample the tone described by `spec`, which must have passed [`ToneSpec::validate`].
///
/// Muted channels of the left and right modes are filled with silence.
///
/// ```
/// use gentone::synth::synthesize;
/// use gentone::tone::{ChannelMode, ToneSpec};
///
/// let spec = ToneSpec { channels: ChannelMode::Left, sample_rate: 8000, ..ToneSpec::default() };
/// let wave = synthesize(&spec);
/// assert_eq!(wave.channels(), 2);
/// assert_eq!(wave.frames(), 8000);
/// assert!(wave.samples().iter().skip(1).step_by(2).all(|&s| s == 0));
/// ```
pub fn synthesize(spec: &ToneSpec) -> Wave {
    debug_assert!(spec.validate().is_ok(), "synthesizing invalid {:?}", spec);
    let frames = frame_count(spec);
    let channels = spec.channels.channel_count();
    let cycles_per_sample = spec.frequency / spec.sample_rate as f64;

    let mut samples = Vec::with_capacity(frames * channels);
    for i in 0..frames {
        let sample = spec.shape.sample(i, cycles_per_sample, spec.amplitude);
        for j in 0..channels {
            if spec.channels.mutes(j) {
                samples.push(0);
            } else {
                samples.push(sample);
            }
        }
    }

    debug!(
        "synthesized {} frames of {} channels ({} at {} Hz)",
        frames, channels, spec.shape, spec.frequency
    );
    Wave::new(channels, spec.sample_rate, samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note;
    use crate::tone::ChannelMode;

    #[test]
    fn zero_length_a4_end_to_end() {
        let spec = ToneSpec {
            frequency: 440.0,
            shape: WaveShape::Sine,
            channels: ChannelMode::Mono,
            sample_rate: 44100,
            duration: 0.0,
            amplitude: 1.0,
            ..ToneSpec::default()
        };
        spec.validate().unwrap();
        let wave = synthesize(&spec);
        assert_eq!(wave.channels(), 1);
        assert_eq!(wave.frames(), 44100);
        assert_eq!(wave.samples()[0], 0);
        assert_eq!(note::frequency_to_note(spec.frequency, spec.a4).unwrap(), "A4");
    }

    #[test]
    fn sample_count_follows_duration() {
        for &(duration, rate) in &[(0.0, 8000), (0.5, 8000), (1.0, 22050), (2.25, 8000), (1.00001, 44100)] {
            for &mode in &[ChannelMode::Mono, ChannelMode::Stereo, ChannelMode::Left] {
                let spec = ToneSpec {
                    duration,
                    sample_rate: rate,
                    channels: mode,
                    ..ToneSpec::default()
                };
                let wave = synthesize(&spec);
                let frames = (duration.max(1.0) * rate as f64).round() as usize;
                assert_eq!(wave.len(), frames * mode.channel_count());
            }
        }
    }

    #[test]
    fn sine_starts_silent_on_every_channel() {
        for &mode in &[ChannelMode::Mono, ChannelMode::Stereo, ChannelMode::Left, ChannelMode::Right] {
            let wave = synthesize(&ToneSpec { channels: mode, ..ToneSpec::default() });
            assert!(wave.frame(0).unwrap().iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn square_alternates_between_biased_peaks() {
        let amplitude = 0.5;
        let spec = ToneSpec {
            shape: WaveShape::Square,
            frequency: 441.0,
            amplitude,
            ..ToneSpec::default()
        };
        let wave = synthesize(&spec);
        let high = (amplitude * (MAX_AMPLITUDE - 1.0)) as i16;
        let low = (amplitude * -MAX_AMPLITUDE) as i16;
        let cycles_per_sample = spec.frequency / spec.sample_rate as f64;
        for (i, &sample) in wave.samples().iter().enumerate() {
            let cycles = cycles_per_sample * i as f64;
            let sine = (2.0 * std::f64::consts::PI * cycles).sin();
            assert_eq!(sample, if sine >= 0.0 { high } else { low }, "sample {}", i);
        }
        assert!(wave.samples().contains(&high) && wave.samples().contains(&low));
    }

    #[test]
    fn stereo_duplicates_and_right_mutes_left() {
        let stereo = synthesize(&ToneSpec {
            channels: ChannelMode::Stereo,
            shape: WaveShape::Triangle,
            ..ToneSpec::default()
        });
        for i in 0..stereo.frames() {
            let frame = stereo.frame(i).unwrap();
            assert_eq!(frame[0], frame[1]);
        }

        let right = synthesize(&ToneSpec {
            channels: ChannelMode::Right,
            ..ToneSpec::default()
        });
        assert!(right.samples().iter().step_by(2).all(|&s| s == 0));
        assert!(right.samples().iter().skip(1).step_by(2).any(|&s| s != 0));
    }

    #[test]
    fn samples_stay_within_amplitude() {
        for &shape in &[WaveShape::Sine, WaveShape::Square, WaveShape::Triangle, WaveShape::Saw] {
            let wave = synthesize(&ToneSpec {
                shape,
                amplitude: 0.3,
                frequency: 123.4,
                ..ToneSpec::default()
            });
            let limit = (0.3 * MAX_AMPLITUDE).ceil() as i16;
            assert!(wave.samples().iter().all(|s| s.abs() <= limit), "{}", shape);
        }
    }
}
