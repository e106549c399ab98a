// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Generate a tone from a note or frequency, play it and draw it in the terminal.

pub mod error;
pub mod interrupt;
pub mod note;
pub mod output;
pub mod render;
pub mod synth;
pub mod tone;
pub mod wave;

// Utility modules
pub mod util;

pub use error::{Error, Result};
