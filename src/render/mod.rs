// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Drawing one period of a wave into the terminal, optionally in step with playback.
//!
//! The drawing goes upwards from the line above the cursor, starting right of a
//! margin that leaves room for the labels printed before it.

pub mod color;

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, MoveUp, Show};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::tty::IsTty;
use log::trace;

use self::color::{Hsl, Rgb};
use crate::error::{Error, Result};
use crate::output::PlaybackStatus;
use crate::tone::ToneSpec;
use crate::util::scale;
use crate::wave::Wave;

/// Columns left free for labels.
pub const LEFT_MARGIN: u16 = 20;
/// Rows used at most for the drawing.
pub const MAX_HEIGHT: u16 = 10;

/// Longest stretch slept without checking for cancellation.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Whether output is coloured.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorChoice {
    On,
    Off,
    /// Colour when stdout is a terminal.
    Auto,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "on" => Ok(ColorChoice::On),
            "off" => Ok(ColorChoice::Off),
            "auto" => Ok(ColorChoice::Auto),
            _ => Err(format!("unknown colour mode '{}', expected on, off or auto", s)),
        }
    }
}

/// Terminal facts needed by the renderer.
pub trait Terminal {
    /// Width and height in character cells.
    fn size(&self) -> io::Result<(u16, u16)>;
    /// Zero based row the cursor is on.
    fn cursor_row(&mut self) -> io::Result<u16>;
}

/// The terminal attached to the process.
pub struct Crossterm;

impl Terminal for Crossterm {
    fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn cursor_row(&mut self) -> io::Result<u16> {
        crossterm::cursor::position().map(|(_column, row)| row)
    }
}

/// State shared between the renderer and whoever may cancel it.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Whether stdout is an interactive terminal. Nothing is drawn otherwise.
    pub is_term: bool,
    pub use_color: bool,
    /// Set from outside (e.g. on an interrupt) to stop drawing as soon as possible.
    pub cancel: Arc<AtomicBool>,
}

impl RenderContext {
    /// Inspect stdout to decide how to draw.
    pub fn detect(color: ColorChoice) -> Self {
        let is_term = io::stdout().is_tty();
        let use_color = match color {
            ColorChoice::On => true,
            ColorChoice::Off => false,
            ColorChoice::Auto => is_term,
        };
        RenderContext {
            is_term,
            use_color,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Fail with [`Error::Interrupted`] once cancelled.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancelled() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration`, waking up early on cancellation.
    fn pause(&self, duration: Duration) -> Result<()> {
        let deadline = Instant::now() + duration;
        loop {
            self.check_cancelled()?;
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            thread::sleep(SLEEP_SLICE.min(deadline - now));
        }
    }
}

/// The part of the terminal the wave is drawn into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Area {
    pub width: u16,
    /// Highest row above the baseline.
    pub height: u16,
}

impl Area {
    /// Fit the drawing into a terminal of the given size, `None` if it is too small.
    ///
    /// Terminals with at most ten rows lose two more rows to keep the prompt in view.
    pub fn fit(columns: u16, rows: u16) -> Option<Area> {
        if columns <= LEFT_MARGIN {
            return None;
        }
        let height = if rows > MAX_HEIGHT {
            MAX_HEIGHT
        } else {
            rows.saturating_sub(2)
        };
        if height == 0 {
            return None;
        }
        Some(Area {
            width: columns - LEFT_MARGIN,
            height,
        })
    }
}

/// One glyph of the drawing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    /// Column within the drawing area, not counting the margin.
    pub column: u16,
    /// Rows above the baseline.
    pub row: u16,
    pub color: Option<Rgb>,
}

/// Map the first period of the wave onto the area, one cell per sample.
///
/// At most one period is drawn and never more columns than the area is wide.
pub fn plot(wave: &Wave, spec: &ToneSpec, area: Area, use_color: bool) -> Result<Vec<Cell>> {
    let columns = (area.width as usize)
        .min(wave.frames())
        .min(spec.wave_period());
    let channel = spec
        .channels
        .display_channel()
        .min(wave.channels().saturating_sub(1));
    let height = area.height as f64;

    let mut cells = Vec::with_capacity(columns);
    for x in 0..columns {
        let sample = wave.samples()[x * wave.channels() + channel];
        let y = scale(
            sample as f64,
            i16::MIN as f64,
            i16::MAX as f64,
            0.0,
            height,
        )?
        .round();
        let color = if use_color {
            Some(Hsl::vivid(0.0 - (360.0 / height) * y).to_rgb())
        } else {
            None
        };
        cells.push(Cell {
            column: x as u16,
            row: y as u16,
            color,
        });
    }
    Ok(cells)
}

/// Delay between two columns so that drawing takes about as long as the tone plays.
pub fn column_delay(spec: &ToneSpec, area: Area) -> Duration {
    let columns = spec.wave_period().min(area.width as usize);
    if columns == 0 {
        return Duration::from_millis(0);
    }
    let millis = (spec.duration * 1000.0 / columns as f64).round();
    Duration::from_millis(millis as u64)
}

/// Hides the cursor while alive and puts the terminal back in order when dropped,
/// whichever way the drawing ends.
pub struct CursorGuard<'a, W: Write> {
    out: &'a mut W,
    baseline: Option<u16>,
}

impl<'a, W: Write> CursorGuard<'a, W> {
    pub fn hide(out: &'a mut W) -> io::Result<Self> {
        queue!(out, Hide)?;
        out.flush()?;
        Ok(CursorGuard {
            out,
            baseline: None,
        })
    }

    /// Remember the row to return to.
    pub fn set_baseline(&mut self, row: u16) {
        self.baseline = Some(row);
    }
}

impl<W: Write> Write for CursorGuard<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for CursorGuard<'_, W> {
    fn drop(&mut self) {
        let _ = queue!(self.out, ResetColor);
        if let Some(row) = self.baseline {
            let _ = queue!(self.out, MoveTo(0, row));
        }
        let _ = queue!(self.out, Print("\n"), Show);
        let _ = self.out.flush();
    }
}

/// Draw the wave into the terminal.
///
/// With a playback handle that reports playing, the columns are paced to the
/// duration of the tone. The pacing does not account for the time spent drawing.
pub fn render<W: Write, T: Terminal>(
    out: &mut W,
    term: &mut T,
    ctx: &RenderContext,
    wave: &Wave,
    spec: &ToneSpec,
    mut playback: Option<&mut dyn PlaybackStatus>,
) -> Result<()> {
    let terminal_error = |source| Error::Terminal { source };
    let (columns, rows) = term.size().map_err(terminal_error)?;
    let area = match Area::fit(columns, rows) {
        Some(area) => area,
        None => {
            trace!("terminal of {}x{} too small to draw", columns, rows);
            return Ok(());
        }
    };
    let cells = plot(wave, spec, area, ctx.use_color)?;
    let delay = column_delay(spec, area);
    trace!(
        "drawing {} columns into {:?}, {:?} per column",
        cells.len(),
        area,
        delay
    );

    let mut guard = CursorGuard::hide(out).map_err(terminal_error)?;
    queue!(guard, MoveUp(1)).map_err(terminal_error)?;
    guard.flush().map_err(terminal_error)?;
    let baseline = term.cursor_row().map_err(terminal_error)?;
    guard.set_baseline(baseline);

    for cell in cells {
        ctx.check_cancelled()?;
        draw_cell(&mut guard, &cell, baseline, &spec.glyph).map_err(terminal_error)?;
        if let Some(playback) = playback.as_mut() {
            guard.flush().map_err(terminal_error)?;
            if playback.is_playing() {
                ctx.pause(delay)?;
            }
        }
    }
    Ok(())
}

fn draw_cell<W: Write>(out: &mut W, cell: &Cell, baseline: u16, glyph: &str) -> io::Result<()> {
    queue!(
        out,
        MoveTo(LEFT_MARGIN + cell.column, baseline.saturating_sub(cell.row))
    )?;
    if let Some(Rgb { r, g, b }) = cell.color {
        queue!(out, ResetColor, SetForegroundColor(Color::Rgb { r, g, b }))?;
    }
    queue!(out, Print(glyph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{synthesize, WaveShape};
    use crate::tone::ChannelMode;

    struct FakeTerminal {
        columns: u16,
        rows: u16,
        row: u16,
    }

    impl Terminal for FakeTerminal {
        fn size(&self) -> io::Result<(u16, u16)> {
            Ok((self.columns, self.rows))
        }

        fn cursor_row(&mut self) -> io::Result<u16> {
            Ok(self.row)
        }
    }

    struct FakePlayback {
        polled: usize,
        playing: bool,
    }

    impl PlaybackStatus for FakePlayback {
        fn is_playing(&mut self) -> bool {
            self.polled += 1;
            self.playing
        }
    }

    fn context(use_color: bool) -> RenderContext {
        RenderContext {
            is_term: true,
            use_color,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    fn draw(
        spec: &ToneSpec,
        term: &mut FakeTerminal,
        ctx: &RenderContext,
        playback: Option<&mut dyn PlaybackStatus>,
    ) -> (Result<()>, String) {
        let wave = synthesize(spec);
        let mut out = Vec::new();
        let result = render(&mut out, term, ctx, &wave, spec, playback);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn area_fits_into_terminal() {
        assert_eq!(Area::fit(80, 24), Some(Area { width: 60, height: 10 }));
        assert_eq!(Area::fit(21, 11), Some(Area { width: 1, height: 10 }));
        assert_eq!(Area::fit(80, 8), Some(Area { width: 60, height: 6 }));
        assert_eq!(Area::fit(20, 24), None);
        assert_eq!(Area::fit(80, 2), None);
    }

    #[test]
    fn plot_draws_at_most_one_period() {
        let spec = ToneSpec {
            frequency: 4410.0,
            ..ToneSpec::default()
        };
        let wave = synthesize(&spec);
        let cells = plot(&wave, &spec, Area { width: 60, height: 10 }, false).unwrap();
        assert_eq!(cells.len(), 10);

        let spec = ToneSpec::default();
        let wave = synthesize(&spec);
        let cells = plot(&wave, &spec, Area { width: 60, height: 10 }, false).unwrap();
        assert_eq!(cells.len(), 60);
        assert!(cells.iter().enumerate().all(|(x, c)| c.column as usize == x));
    }

    #[test]
    fn plot_scales_amplitude_to_rows() {
        let wave = Wave::new(1, 8, vec![i16::MIN, 0, i16::MAX, -16384]);
        let spec = ToneSpec {
            frequency: 2.0,
            sample_rate: 8,
            ..ToneSpec::default()
        };
        let rows: Vec<_> = plot(&wave, &spec, Area { width: 60, height: 10 }, false)
            .unwrap()
            .iter()
            .map(|c| c.row)
            .collect();
        assert_eq!(rows, vec![0, 5, 10, 3]);
    }

    #[test]
    fn plot_colours_follow_rows() {
        let wave = Wave::new(1, 8, vec![i16::MIN, i16::MAX]);
        let spec = ToneSpec {
            frequency: 4.0,
            sample_rate: 8,
            ..ToneSpec::default()
        };
        let cells = plot(&wave, &spec, Area { width: 60, height: 3 }, true).unwrap();
        assert_eq!(cells[0].color, Some(Rgb { r: 255, g: 0, b: 0 }));
        // top row: a full turn around the colour wheel
        assert_eq!(cells[1].color, Some(Rgb { r: 255, g: 0, b: 0 }));

        let mid = Wave::new(1, 8, vec![10923]);
        let cells = plot(&mid, &spec, Area { width: 60, height: 3 }, true).unwrap();
        assert_eq!(cells[0].row, 2);
        assert_eq!(cells[0].color, Some(Rgb { r: 0, g: 255, b: 0 }));
    }

    #[test]
    fn plot_reads_the_right_channel_when_only_right_plays() {
        let spec = ToneSpec {
            channels: ChannelMode::Right,
            shape: WaveShape::Square,
            ..ToneSpec::default()
        };
        let wave = synthesize(&spec);
        let cells = plot(&wave, &spec, Area { width: 60, height: 10 }, false).unwrap();
        assert_eq!(cells[1].row, 10);

        let left = ToneSpec {
            channels: ChannelMode::Left,
            ..spec
        };
        let wave = synthesize(&left);
        let cells = plot(&wave, &left, Area { width: 60, height: 10 }, false).unwrap();
        assert_eq!(cells[1].row, 10);
    }

    #[test]
    fn delay_spreads_duration_over_columns() {
        let spec = ToneSpec {
            duration: 3.0,
            ..ToneSpec::default()
        };
        assert_eq!(
            column_delay(&spec, Area { width: 60, height: 10 }),
            Duration::from_millis(50)
        );
        assert_eq!(
            column_delay(&spec, Area { width: 200, height: 10 }),
            Duration::from_millis(30)
        );
    }

    #[test]
    fn render_draws_every_column_and_restores_cursor() {
        let spec = ToneSpec::default();
        let mut term = FakeTerminal {
            columns: 80,
            rows: 24,
            row: 12,
        };
        let (result, out) = draw(&spec, &mut term, &context(false), None);
        result.unwrap();
        assert_eq!(out.matches('*').count(), 60);
        assert!(out.starts_with("\x1b[?25l"));
        // back to the baseline, newline, cursor visible
        assert!(out.ends_with("\x1b[13;1H\n\x1b[?25h"));
        assert!(!out.contains("\x1b[38;2;"));
    }

    #[test]
    fn render_in_colour() {
        let spec = ToneSpec {
            glyph: "#".to_string(),
            ..ToneSpec::default()
        };
        let mut term = FakeTerminal {
            columns: 30,
            rows: 24,
            row: 12,
        };
        let (result, out) = draw(&spec, &mut term, &context(true), None);
        result.unwrap();
        assert_eq!(out.matches('#').count(), 10);
        assert_eq!(out.matches("\x1b[38;2;").count(), 10);
    }

    #[test]
    fn render_skips_small_terminals() {
        let mut term = FakeTerminal {
            columns: 20,
            rows: 24,
            row: 12,
        };
        let (result, out) = draw(&ToneSpec::default(), &mut term, &context(false), None);
        result.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn render_polls_playback_per_column() {
        let spec = ToneSpec {
            duration: 1.0,
            ..ToneSpec::default()
        };
        let mut term = FakeTerminal {
            columns: 30,
            rows: 24,
            row: 12,
        };
        let mut playback = FakePlayback {
            polled: 0,
            playing: false,
        };
        let (result, _) = draw(&spec, &mut term, &context(false), Some(&mut playback));
        result.unwrap();
        assert_eq!(playback.polled, 10);
    }

    #[test]
    fn render_paces_while_playing() {
        let spec = ToneSpec {
            duration: 0.05,
            ..ToneSpec::default()
        };
        let mut term = FakeTerminal {
            columns: 30,
            rows: 24,
            row: 12,
        };
        let mut playback = FakePlayback {
            polled: 0,
            playing: true,
        };
        let started = Instant::now();
        let (result, _) = draw(&spec, &mut term, &context(false), Some(&mut playback));
        result.unwrap();
        // ten columns of 5 ms each
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn cancelled_render_still_restores_cursor() {
        let ctx = context(false);
        ctx.cancel.store(true, Ordering::SeqCst);
        let mut term = FakeTerminal {
            columns: 80,
            rows: 24,
            row: 5,
        };
        let (result, out) = draw(&ToneSpec::default(), &mut term, &ctx, None);
        assert!(matches!(result, Err(Error::Interrupted)));
        assert_eq!(out.matches('*').count(), 0);
        assert!(out.ends_with("\x1b[6;1H\n\x1b[?25h"));
    }
}
