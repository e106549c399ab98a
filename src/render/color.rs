// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Colours of the waveform drawing.

/// A colour in the hue, saturation, lightness model.
/// Hue is in degrees, saturation and lightness in percent.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// A true colour with 8 bits per component.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Hsl {
    /// Fully saturated colour of medium lightness.
    pub fn vivid(hue: f64) -> Self {
        Hsl {
            hue,
            saturation: 100.0,
            lightness: 50.0,
        }
    }

    /// Convert to RGB. Hues outside of [0, 360) wrap around.
    ///
    /// ```
    /// use gentone::render::color::{Hsl, Rgb};
    ///
    /// assert_eq!(Hsl::vivid(0.0).to_rgb(), Rgb { r: 255, g: 0, b: 0 });
    /// assert_eq!(Hsl::vivid(-240.0).to_rgb(), Rgb { r: 0, g: 255, b: 0 });
    /// ```
    pub fn to_rgb(self) -> Rgb {
        let hue = self.hue.rem_euclid(360.0);
        let saturation = (self.saturation / 100.0).max(0.0).min(1.0);
        let lightness = (self.lightness / 100.0).max(0.0).min(1.0);

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = lightness - chroma / 2.0;
        let channel = |c: f64| ((c + m) * 255.0).round() as u8;
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}
