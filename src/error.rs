// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Everything that can go wrong between reading the tone parameters and
//! getting the tone out of the speakers.

use std::io;
use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("invalid frequency '{}'", frequency))]
    InvalidFrequency { frequency: f64 },
    #[snafu(display("invalid note '{}'", note))]
    InvalidNote { note: String },
    #[snafu(display(
        "invalid range [{}, {}] -> [{}, {}]",
        in_min,
        in_max,
        out_min,
        out_max
    ))]
    InvalidRange {
        in_min: f64,
        in_max: f64,
        out_min: f64,
        out_max: f64,
    },
    #[snafu(display("invalid {} '{}'", name, value))]
    InvalidParameter { name: &'static str, value: String },
    #[snafu(display("failed to load audio from sample: {}", reason))]
    AudioLoad { reason: String },
    #[snafu(display("failed to save audio to '{}': {}", path.display(), source))]
    FileWrite { path: PathBuf, source: io::Error },
    #[snafu(display("failed to play audio: {}", source))]
    Playback { source: io::Error },
    #[snafu(display("terminal error: {}", source))]
    Terminal { source: io::Error },
    #[snafu(display("interrupted"))]
    Interrupted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
