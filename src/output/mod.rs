// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Getting a wave out of the process: to the speakers or into a file.

pub mod sox;

use crate::error::{Error, Result};
use crate::wave::Wave;

/// Something that plays audio and can tell whether it is still doing so.
pub trait PlaybackStatus {
    fn is_playing(&mut self) -> bool;
}

/// Check that a wave can be handed to an audio player.
///
/// ```
/// use gentone::output::validate;
/// use gentone::wave::Wave;
///
/// assert!(validate(&Wave::new(2, 44100, vec![0, 0])).is_ok());
/// assert!(validate(&Wave::new(1, 44100, vec![])).is_err());
/// assert!(validate(&Wave::new(1, 0, vec![0])).is_err());
/// ```
pub fn validate(wave: &Wave) -> Result<()> {
    let reason = if !(1..=2).contains(&wave.channels()) {
        format!("unsupported channel count {}", wave.channels())
    } else if wave.sample_rate() == 0 {
        "sample rate of 0 Hz".to_string()
    } else if wave.len() == 0 {
        "no samples".to_string()
    } else if wave.len() % wave.channels() != 0 {
        format!(
            "{} samples do not fill {} channels",
            wave.len(),
            wave.channels()
        )
    } else {
        return Ok(());
    };
    Err(Error::AudioLoad { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_more_than_two_channels() {
        match validate(&Wave::new(3, 44100, vec![0, 0, 0])) {
            Err(Error::AudioLoad { reason }) => assert!(reason.contains("channel count 3")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
