// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Conversion between note names and frequencies in twelve tone equal temperament.
//!
//! Notes are counted in semitones starting at C0, which puts A4 on semitone 57.
//! All frequencies are relative to the pitch assigned to A4.

use crate::error::{Error, Result};
use crate::util::from_semitones;

/// Semitone index of A4 when counting from C0.
pub const A4_SEMITONE: i64 = 57;

/// Name of every semitone within an octave, spelled with sharps.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Every accepted spelling of a note name (lower case) with its offset from C.
/// Cross-letter spellings like `e#` or `cb` stay in the octave given with the note.
pub const SPELLINGS: [(&str, i64); 21] = [
    ("cb", 11),
    ("c", 0),
    ("c#", 1),
    ("db", 1),
    ("d", 2),
    ("d#", 3),
    ("eb", 3),
    ("e", 4),
    ("e#", 5),
    ("fb", 5),
    ("f", 5),
    ("f#", 6),
    ("gb", 6),
    ("g", 7),
    ("g#", 8),
    ("ab", 8),
    ("a", 9),
    ("a#", 10),
    ("bb", 10),
    ("b", 11),
    ("b#", 0),
];

/// Name the note closest to `frequency`, e.g. `"A4"` or `"C#7"`.
///
/// Frequencies below C0 get negative octaves; the octave is floored so the
/// letter always matches the octave it is printed with.
///
/// # Examples
///
/// ```
/// use gentone::note::*;
///
/// assert_eq!(frequency_to_note(440.0, 440.0).unwrap(), "A4");
/// assert_eq!(frequency_to_note(261.63, 440.0).unwrap(), "C4");
/// assert_eq!(frequency_to_note(2217.46, 440.0).unwrap(), "C#7");
/// assert_eq!(frequency_to_note(432.0, 432.0).unwrap(), "A4");
/// assert!(frequency_to_note(0.0, 440.0).is_err());
/// ```
pub fn frequency_to_note(frequency: f64, a4: f64) -> Result<String> {
    check_frequency(frequency)?;
    check_frequency(a4)?;
    let semitones = (12.0 * (frequency / a4).log2()).round() as i64 + A4_SEMITONE;
    let name = SHARP_NAMES[semitones.rem_euclid(12) as usize];
    let octave = semitones.div_euclid(12);
    Ok(format!("{}{}", name, octave))
}

/// Compute the frequency of a note written as `<letter>[b|#]<octave>`, rounded to 1/100 Hz.
/// The name is case insensitive.
///
/// # Examples
///
/// ```
/// use gentone::note::*;
///
/// assert_eq!(note_to_frequency("A4", 440.0).unwrap(), 440.0);
/// assert_eq!(note_to_frequency("a5", 440.0).unwrap(), 880.0);
/// assert_eq!(note_to_frequency("C4", 440.0).unwrap(), 261.63);
/// assert_eq!(note_to_frequency("Bb3", 440.0).unwrap(), 233.08);
/// assert_eq!(note_to_frequency("E#4", 440.0).unwrap(), note_to_frequency("F4", 440.0).unwrap());
/// assert!(note_to_frequency("H2", 440.0).is_err());
/// ```
pub fn note_to_frequency(note: &str, a4: f64) -> Result<f64> {
    check_frequency(a4)?;
    let invalid = || Error::InvalidNote {
        note: note.to_string(),
    };

    let (offset, octave) = parse_note(note).ok_or_else(invalid)?;
    let semitones = octave
        .checked_mul(12)
        .and_then(|s| s.checked_add(offset - A4_SEMITONE))
        .ok_or_else(invalid)?;
    let frequency = (a4 * from_semitones(semitones as f64) * 100.0).round() / 100.0;
    if frequency.is_finite() {
        Ok(frequency)
    } else {
        Err(invalid())
    }
}

/// Split a note name into its offset from C and its octave.
fn parse_note(note: &str) -> Option<(i64, i64)> {
    let lower = note.to_ascii_lowercase();
    let mut chars = lower.chars();
    let letter = chars.next()?;
    if !('a'..='g').contains(&letter) {
        return None;
    }

    let rest = chars.as_str();
    let octave_str = rest.trim_start_matches(|ch: char| ch == 'b' || ch == '#');
    let accidental_len = rest.len() - octave_str.len();
    if accidental_len > 1
        || octave_str.is_empty()
        || !octave_str.chars().all(|ch| ch.is_ascii_digit())
    {
        return None;
    }

    let spelling = &lower[..1 + accidental_len];
    let offset = SPELLINGS
        .iter()
        .find(|(name, _)| *name == spelling)
        .map(|(_, offset)| *offset)?;
    let octave = octave_str.parse().ok()?;
    Some((offset, octave))
}

fn check_frequency(frequency: f64) -> Result<()> {
    if frequency > 0.0 && frequency.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidFrequency { frequency })
    }
}
