// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Small numeric helpers shared by the note conversion and the renderer.

use crate::error::{Error, Result};

/// Compute a factor measured in semitones (one octave consists of 12 semitones)
///
/// # Example
///
/// ```
/// # use gentone::util::*;
///
/// assert_eq!(from_semitones(12.0), 2.0);
/// assert_eq!(from_semitones(-24.0), 0.25);
/// ```
pub fn from_semitones(semitones: f64) -> f64 {
    2.0f64.powf(semitones / 12.0)
}

/// Linearly map `value` from the range `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// An empty input range maps everything to `out_min`.
///
/// # Example
///
/// ```
/// # use gentone::util::*;
///
/// assert_eq!(scale(5.0, 0.0, 10.0, 0.0, 100.0).unwrap(), 50.0);
/// assert_eq!(scale(3.0, 3.0, 3.0, 1.0, 2.0).unwrap(), 1.0);
/// assert!(scale(0.0, 1.0, 0.0, 0.0, 1.0).is_err());
/// ```
pub fn scale(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<f64> {
    // also rejects NaN bounds
    if !(in_min <= in_max && out_min <= out_max) {
        return Err(Error::InvalidRange {
            in_min,
            in_max,
            out_min,
            out_max,
        });
    }
    if in_min == in_max {
        return Ok(out_min);
    }
    Ok(out_min + (out_max - out_min) * ((value - in_min) / (in_max - in_min)))
}
