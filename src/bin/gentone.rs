// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `gentone` - generate a tone from a note or frequency.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use log::{debug, info, warn};
use structopt::StructOpt;

use gentone::interrupt;
use gentone::note;
use gentone::output::sox::{self, SoxPlayer};
use gentone::output::PlaybackStatus;
use gentone::render::{self, ColorChoice, Crossterm, RenderContext};
use gentone::synth::{self, WaveShape};
use gentone::tone::{ChannelMode, ToneSpec};
use gentone::{Error, Result};

#[derive(Debug, StructOpt)]
#[structopt(name = "gentone", about = "Generate a tone from a note or frequency.")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Frequency in Hz or a musical note like A4, C#7 or Bb2. Defaults to the A4 pitch.
    tone: Option<String>,

    /// Print the output with colour either on, off, or auto based on if stdout is a tty.
    #[structopt(long = "colour", default_value = "auto")]
    colour: ColorChoice,

    /// Loop the generated tone.
    #[structopt(short = "l", long = "loop")]
    looping: bool,

    /// The character used to draw the wave diagram.
    #[structopt(long = "char", default_value = "*")]
    glyph: String,

    /// The standard pitch frequency used for the A above middle C, in Hz.
    #[structopt(long, default_value = "440")]
    a4: f64,

    /// The speed of sound in m/s.
    #[structopt(long, default_value = "343")]
    sos: f64,

    /// The type of waveform used to generate the tone: sine, square, triangle or saw.
    #[structopt(short, long, default_value = "sine")]
    wave: WaveShape,

    /// The duration of the tone in seconds. With 0 the tone is only drawn.
    #[structopt(short, long, default_value = "0")]
    time: f64,

    /// The channels to use: 1, 2, mono, stereo, left or right.
    #[structopt(short, long, default_value = "1")]
    channels: ChannelMode,

    /// The sample rate used to generate the tone, in Hz.
    #[structopt(short, long, default_value = "44100")]
    rate: u32,

    /// The max amplitude of the generated tone, between 0.0 and 1.0.
    #[structopt(short, long, default_value = "1")]
    amplitude: f64,

    /// Save the generated tone to a file (any sox-supported format) instead of playing it.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

impl Opt {
    /// Resolve the options into a validated tone.
    fn tone_spec(&self) -> Result<ToneSpec> {
        let frequency = match &self.tone {
            None => self.a4,
            Some(tone) => match tone.parse::<f64>() {
                Ok(frequency) => frequency,
                Err(_) => note::note_to_frequency(tone, self.a4)?,
            },
        };
        let duration = if self.looping && self.time == 0.0 {
            1.0
        } else {
            self.time
        };
        let spec = ToneSpec {
            frequency,
            a4: self.a4,
            speed_of_sound: self.sos,
            shape: self.wave,
            channels: self.channels,
            duration,
            sample_rate: self.rate,
            amplitude: self.amplitude,
            looping: self.looping,
            glyph: self.glyph.clone(),
        };
        spec.validate()?;
        Ok(spec)
    }
}

fn main() {
    let opt: Opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(err) = simple_logger::init_with_level(level) {
        eprintln!("failed to set up logging: {}", err);
    }

    let ctx = RenderContext::detect(opt.colour);
    if let Err(err) = interrupt::listen(ctx.cancel.clone()) {
        warn!("interrupts will not restore the terminal: {}", err);
    }

    match run(&opt, &ctx) {
        Ok(()) => {}
        Err(Error::Interrupted) => process::exit(1),
        Err(err) => {
            debug!("{:?}", err);
            report_error(&err, ctx.use_color);
            process::exit(1);
        }
    }
}

fn run(opt: &Opt, ctx: &RenderContext) -> Result<()> {
    let spec = opt.tone_spec()?;

    let stdout = io::stdout();
    // the lock is only held while writing, never while waiting for playback
    spec.describe(&mut stdout.lock(), ctx.use_color)?;

    let mut wave = synth::synthesize(&spec);
    wave.trim_tail();
    ctx.check_cancelled()?;

    if let Some(path) = &opt.output {
        return sox::export(&wave, path).map_err(|err| interrupted_or(ctx, err));
    }

    if spec.duration > 0.0 {
        let mut player = SoxPlayer::play(&wave, spec.looping)?;
        if ctx.is_term {
            render::render(
                &mut stdout.lock(),
                &mut Crossterm,
                ctx,
                &wave,
                &spec,
                Some(&mut player),
            )?;
        }
        loop {
            if ctx.cancelled() {
                player.stop();
                restore_terminal(&mut stdout.lock());
                return Err(Error::Interrupted);
            }
            if !player.is_playing() {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }
        player.finish().map_err(|err| interrupted_or(ctx, err))
    } else if ctx.is_term {
        render::render(&mut stdout.lock(), &mut Crossterm, ctx, &wave, &spec, None)
    } else {
        info!("not a terminal, nothing to draw");
        Ok(())
    }
}

/// Failures of child processes are expected when they were interrupted along with us.
fn interrupted_or(ctx: &RenderContext, err: Error) -> Error {
    if ctx.cancelled() {
        Error::Interrupted
    } else {
        err
    }
}

fn restore_terminal<W: Write>(out: &mut W) {
    let _ = queue!(out, ResetColor, Print("\n"), Show);
    let _ = out.flush();
}

fn report_error(err: &Error, use_color: bool) {
    let mut stderr = io::stderr();
    let _ = if use_color {
        queue!(
            stderr,
            Print("\n"),
            SetForegroundColor(Color::Rgb { r: 0xff, g: 0x54, b: 0x54 }),
            Print("Error: "),
            ResetColor,
            Print(format!("{}\n", err))
        )
    } else {
        queue!(stderr, Print(format!("\nError: {}\n", err)))
    };
    let _ = stderr.flush();
}
