// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The closed form shapes a tone can take.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Largest magnitude of a signed 16 bit sample that fits both halves of a wave.
pub const MAX_AMPLITUDE: f64 = 32767.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WaveShape {
    Sine,
    Square,
    /// Built from the arc sine of a sine, which gives straight flanks.
    Triangle,
    /// Rising ramp from the negative to the positive peak once per cycle.
    Saw,
}

impl WaveShape {
    /// Evaluate sample `index` of a wave advancing `cycles_per_sample` periods per
    /// sample, scaled to 16 bits at the given amplitude.
    ///
    /// The positive half of a square wave stays one step below the peak,
    /// the negative half reaches it.
    ///
    /// ```
    /// use gentone::synth::WaveShape;
    ///
    /// assert_eq!(WaveShape::Sine.sample(0, 0.01, 1.0), 0);
    /// assert_eq!(WaveShape::Sine.sample(25, 0.01, 1.0), 32767);
    /// assert_eq!(WaveShape::Square.sample(10, 0.01, 1.0), 32766);
    /// assert_eq!(WaveShape::Square.sample(60, 0.01, 1.0), -32767);
    /// assert_eq!(WaveShape::Saw.sample(0, 0.01, 0.5), -16383);
    /// ```
    pub fn sample(self, index: usize, cycles_per_sample: f64, amplitude: f64) -> i16 {
        let peak = amplitude * MAX_AMPLITUDE;
        let cycles = cycles_per_sample * index as f64;
        let sine = (2.0 * PI * cycles).sin();
        let value = match self {
            WaveShape::Sine => peak * sine,
            WaveShape::Square => {
                if sine >= 0.0 {
                    amplitude * (MAX_AMPLITUDE - 1.0)
                } else {
                    -peak
                }
            }
            WaveShape::Triangle => (2.0 * peak / PI) * sine.asin(),
            WaveShape::Saw => peak * (2.0 * cycles.fract() - 1.0),
        };
        // saturating, truncates towards zero
        value as i16
    }
}

impl FromStr for WaveShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(WaveShape::Sine),
            "square" => Ok(WaveShape::Square),
            "triangle" => Ok(WaveShape::Triangle),
            "saw" => Ok(WaveShape::Saw),
            _ => Err(format!(
                "unknown wave '{}', expected sine, square, triangle or saw",
                s
            )),
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WaveShape::Sine => "sine",
            WaveShape::Square => "square",
            WaveShape::Triangle => "triangle",
            WaveShape::Saw => "saw",
        };
        f.write_str(name)
    }
}
