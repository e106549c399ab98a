// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The parameters describing a single tone and how they are validated and presented.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::error::{Error, Result};
use crate::note;
use crate::synth::WaveShape;

/// Upper bound on the interleaved samples of one synthesized tone.
const MAX_SAMPLES: f64 = i32::MAX as f64;

/// Which channels are stored in a wave and which of them carry the signal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChannelMode {
    Mono = 1,
    Stereo = 2,
    /// Two channels, the right one silent.
    Left = 3,
    /// Two channels, the left one silent.
    Right = 4,
}

impl ChannelMode {
    /// Number of channels stored in a wave, modes beyond stereo are clamped to two.
    ///
    /// ```
    /// use gentone::tone::ChannelMode;
    ///
    /// assert_eq!(ChannelMode::Mono.channel_count(), 1);
    /// assert_eq!(ChannelMode::Right.channel_count(), 2);
    /// ```
    pub fn channel_count(self) -> usize {
        (self as usize).min(2)
    }

    /// Whether the channel with the given index is forced to silence.
    pub fn mutes(self, channel: usize) -> bool {
        match self {
            ChannelMode::Left => channel == 1,
            ChannelMode::Right => channel == 0,
            ChannelMode::Mono | ChannelMode::Stereo => false,
        }
    }

    /// Index of the channel within a frame that is shown by the renderer.
    pub fn display_channel(self) -> usize {
        if self == ChannelMode::Right {
            1
        } else {
            0
        }
    }
}

impl FromStr for ChannelMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1" | "mono" => Ok(ChannelMode::Mono),
            "2" | "stereo" => Ok(ChannelMode::Stereo),
            "left" => Ok(ChannelMode::Left),
            "right" => Ok(ChannelMode::Right),
            _ => Err(format!(
                "unknown channel mode '{}', expected 1, 2, mono, stereo, left or right",
                s
            )),
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ChannelMode::Mono => "mono",
            ChannelMode::Stereo => "stereo",
            ChannelMode::Left => "left",
            ChannelMode::Right => "right",
        };
        f.write_str(name)
    }
}

/// Everything needed to synthesize and draw one tone.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSpec {
    /// Frequency of the tone in Hz.
    pub frequency: f64,
    /// Reference pitch of A4 in Hz.
    pub a4: f64,
    /// Speed of sound in m/s, only used for reporting the wavelength.
    pub speed_of_sound: f64,
    pub shape: WaveShape,
    pub channels: ChannelMode,
    /// Duration in seconds. Zero means the tone is only drawn, not played.
    pub duration: f64,
    /// Samples per second.
    pub sample_rate: u32,
    /// Peak amplitude in the range [0, 1].
    pub amplitude: f64,
    pub looping: bool,
    /// What the renderer draws for every column of the wave.
    pub glyph: String,
}

impl Default for ToneSpec {
    fn default() -> Self {
        ToneSpec {
            frequency: 440.0,
            a4: 440.0,
            speed_of_sound: 343.0,
            shape: WaveShape::Sine,
            channels: ChannelMode::Mono,
            duration: 0.0,
            sample_rate: 44100,
            amplitude: 1.0,
            looping: false,
            glyph: "*".to_string(),
        }
    }
}

impl ToneSpec {
    /// Check that the spec describes a tone that can be synthesized.
    ///
    /// ```
    /// use gentone::tone::ToneSpec;
    ///
    /// assert!(ToneSpec::default().validate().is_ok());
    /// assert!(ToneSpec { frequency: 0.0, ..ToneSpec::default() }.validate().is_err());
    /// assert!(ToneSpec { amplitude: 1.5, ..ToneSpec::default() }.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for &frequency in &[self.frequency, self.a4] {
            if !(frequency > 0.0 && frequency.is_finite()) {
                return Err(Error::InvalidFrequency { frequency });
            }
        }
        let invalid = |name: &'static str, value: String| Err(Error::InvalidParameter { name, value });
        if self.sample_rate == 0 {
            return invalid("sample rate", self.sample_rate.to_string());
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return invalid("amplitude", self.amplitude.to_string());
        }
        if !(self.duration >= 0.0 && self.duration.is_finite()) {
            return invalid("time", self.duration.to_string());
        }
        if self.sample_count() > MAX_SAMPLES {
            return invalid("time", self.duration.to_string());
        }
        if !(self.speed_of_sound > 0.0 && self.speed_of_sound.is_finite()) {
            return invalid("speed of sound", self.speed_of_sound.to_string());
        }
        if self.glyph.is_empty() {
            return invalid("char", String::new());
        }
        Ok(())
    }

    /// Number of interleaved samples the synthesized buffer will hold.
    fn sample_count(&self) -> f64 {
        (self.duration.max(1.0) * f64::from(self.sample_rate)).round()
            * self.channels.channel_count() as f64
    }

    /// Length of one period of the tone travelling through air, in meters.
    pub fn wavelength(&self) -> f64 {
        self.speed_of_sound / self.frequency
    }

    /// Number of samples spanning one cycle of the tone.
    pub fn wave_period(&self) -> usize {
        (self.sample_rate as f64 / self.frequency).round() as usize
    }

    /// Print a summary of the tone as aligned key/value lines.
    pub fn describe<W: Write>(&self, out: &mut W, use_color: bool) -> Result<()> {
        self.write_description(out, use_color)
            .map_err(|source| Error::Terminal { source })
    }

    fn write_description<W: Write>(&self, out: &mut W, use_color: bool) -> io::Result<()> {
        let note = note::frequency_to_note(self.frequency, self.a4).unwrap_or_else(|_| "-".into());
        let lines: [(&str, String, &str); 11] = [
            ("  a4", self.a4.to_string(), "Hz"),
            (" sos", self.speed_of_sound.to_string(), "m/s"),
            ("note", note, ""),
            ("freq", self.frequency.to_string(), "Hz"),
            ("size", format!("{:.2}", self.wavelength()), "m"),
            ("wave", self.shape.to_string(), ""),
            ("rate", self.sample_rate.to_string(), "Hz"),
            ("ampl", self.amplitude.to_string(), ""),
            ("chan", self.channels.to_string(), ""),
            ("time", self.duration.to_string(), "s"),
            ("loop", self.looping.to_string(), ""),
        ];
        let style = Style::new(use_color);
        for (key, value, unit) in lines.iter() {
            style.write(out, style.key, key)?;
            style.write(out, style.punctuation, ": ")?;
            style.write(out, style.value, value)?;
            if !unit.is_empty() {
                write!(out, " ")?;
                style.write(out, style.unit, unit)?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}

/// Colours of the info block.
struct Style {
    enabled: bool,
    punctuation: Color,
    key: Color,
    value: Color,
    unit: Color,
}

impl Style {
    fn new(enabled: bool) -> Self {
        let grey = Color::Rgb { r: 0xc0, g: 0xc0, b: 0xc0 };
        Style {
            enabled,
            punctuation: grey,
            key: Color::Rgb { r: 0xff, g: 0x54, b: 0xff },
            value: Color::Rgb { r: 0x54, g: 0xff, b: 0x54 },
            unit: grey,
        }
    }

    fn write<W: Write>(&self, out: &mut W, color: Color, text: &str) -> io::Result<()> {
        if self.enabled {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)
        } else {
            write!(out, "{}", text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_modes_from_command_line() {
        assert_eq!("1".parse::<ChannelMode>(), Ok(ChannelMode::Mono));
        assert_eq!("mono".parse::<ChannelMode>(), Ok(ChannelMode::Mono));
        assert_eq!("2".parse::<ChannelMode>(), Ok(ChannelMode::Stereo));
        assert_eq!("stereo".parse::<ChannelMode>(), Ok(ChannelMode::Stereo));
        assert_eq!("left".parse::<ChannelMode>(), Ok(ChannelMode::Left));
        assert_eq!("right".parse::<ChannelMode>(), Ok(ChannelMode::Right));
        assert!("3".parse::<ChannelMode>().is_err());
    }

    #[test]
    fn muted_channels() {
        assert!(ChannelMode::Left.mutes(1));
        assert!(!ChannelMode::Left.mutes(0));
        assert!(ChannelMode::Right.mutes(0));
        assert!(!ChannelMode::Stereo.mutes(0) && !ChannelMode::Stereo.mutes(1));
        assert_eq!(ChannelMode::Right.display_channel(), 1);
        assert_eq!(ChannelMode::Left.display_channel(), 0);
    }

    #[test]
    fn validation_errors() {
        let base = ToneSpec::default();
        let bad = vec![
            ToneSpec { frequency: -2.0, ..base.clone() },
            ToneSpec { a4: 0.0, ..base.clone() },
            ToneSpec { sample_rate: 0, ..base.clone() },
            ToneSpec { amplitude: -0.1, ..base.clone() },
            ToneSpec { amplitude: f64::NAN, ..base.clone() },
            ToneSpec { duration: -1.0, ..base.clone() },
            ToneSpec { glyph: String::new(), ..base.clone() },
            ToneSpec { duration: 1e15, ..base.clone() },
        ];
        for spec in bad {
            assert!(spec.validate().is_err(), "{:?}", spec);
        }
        match (ToneSpec { frequency: 0.0, ..base }).validate() {
            Err(Error::InvalidFrequency { frequency }) => assert_eq!(frequency, 0.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn buffer_size_is_bounded() {
        let spec = ToneSpec {
            duration: 1e12,
            channels: ChannelMode::Stereo,
            ..ToneSpec::default()
        };
        match spec.validate() {
            Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "time"),
            other => panic!("unexpected {:?}", other),
        }
        // an hour of CD quality stereo still fits
        let spec = ToneSpec { duration: 3600.0, ..spec };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn wave_period_in_samples() {
        let spec = ToneSpec::default();
        assert_eq!(spec.wave_period(), 100);
        let spec = ToneSpec { frequency: 1000.0, sample_rate: 8000, ..spec };
        assert_eq!(spec.wave_period(), 8);
    }

    #[test]
    fn plain_description() {
        let mut out = Vec::new();
        ToneSpec::default().describe(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "  a4: 440 Hz");
        assert_eq!(lines[2], "note: A4");
        assert_eq!(lines[4], "size: 0.78 m");
        assert_eq!(lines[5], "wave: sine");
        assert_eq!(lines[8], "chan: mono");
        assert_eq!(lines[10], "loop: false");
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn coloured_description() {
        let mut out = Vec::new();
        ToneSpec::default().describe(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[38;2;255;84;255m"));
        assert!(text.contains("note"));
    }
}
