// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use super::PlaybackStatus;
use crate::error::{Error, Result};
use crate::wave::Wave;

/// Paths of the `play` and `sox` executables.
fn sox_binaries() -> (PathBuf, PathBuf) {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        debug!("using sox from nix store {}", sox_bin);
        let play = Path::new(sox_bin).join("play");
        let sox = Path::new(sox_bin).join("sox");
        (play, sox)
    } else {
        ("play".into(), "sox".into())
    }
}

/// Arguments describing raw 16 bit input on stdin in the layout of `wave`.
fn input_args(wave: &Wave) -> Vec<String> {
    vec![
        "-R".to_string(), // make the output reproducible
        "--channels".to_string(),
        wave.channels().to_string(),
        "--rate".to_string(),
        wave.sample_rate().to_string(),
        "--type".to_string(),
        "s16".to_string(),
        "--endian".to_string(),
        "little".to_string(),
        "/dev/stdin".to_string(),
    ]
}

fn take_stdin(child: &mut Child) -> io::Result<ChildStdin> {
    child
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "no stdin for sox"))
}

/// A wave playing on the default speakers through `play`.
///
/// The samples are fed from a background thread so the caller is free to draw
/// while the tone is playing. Dropping the player stops playback.
pub struct SoxPlayer {
    player: Child,
    feeder: Option<JoinHandle<io::Result<()>>>,
    stop_signal: Arc<AtomicBool>,
}

impl SoxPlayer {
    /// Start playing `wave`, over and over again if `looping` is set.
    pub fn play(wave: &Wave, looping: bool) -> Result<Self> {
        super::validate(wave)?;
        let (play, _) = sox_binaries();
        let args = input_args(wave);
        debug!("spawning {} {}", play.display(), args.join(" "));

        let mut player = Command::new(&play)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::Playback { source })?;
        let audio_stream = take_stdin(&mut player).map_err(|source| Error::Playback { source })?;

        let stop_signal = Arc::new(AtomicBool::new(false));
        let bytes = wave.to_bytes();
        let feeder = {
            let stop_signal = stop_signal.clone();
            thread::spawn(move || feed(audio_stream, &bytes, looping, &stop_signal))
        };

        info!(
            "playing {:.2} seconds of audio{}",
            wave.duration(),
            if looping { " in a loop" } else { "" }
        );
        Ok(Self {
            player,
            feeder: Some(feeder),
            stop_signal,
        })
    }

    /// Stop playback right away.
    pub fn stop(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Ok(None) = self.player.try_wait() {
            info!("stopping playback");
            if let Err(err) = self.player.kill() {
                warn!("failed to stop player: {}", err);
            }
        }
        let _ = self.player.wait();
        if let Some(feeder) = self.feeder.take() {
            // the feeder fails with a broken pipe once the player is gone
            let _ = feeder.join();
        }
    }

    /// Wait for playback to end on its own and report how it went.
    pub fn finish(mut self) -> Result<()> {
        let status = self.player.wait().map_err(|source| Error::Playback { source })?;
        let fed = match self.feeder.take() {
            Some(feeder) => feeder.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "audio feeder panicked"))
            }),
            None => Ok(()),
        };
        if !status.success() {
            let message = format!("player exited with {}", status);
            return Err(Error::Playback {
                source: io::Error::new(io::ErrorKind::Other, message),
            });
        }
        fed.map_err(|source| Error::Playback { source })
    }
}

impl PlaybackStatus for SoxPlayer {
    fn is_playing(&mut self) -> bool {
        matches!(self.player.try_wait(), Ok(None))
    }
}

impl Drop for SoxPlayer {
    fn drop(&mut self) {
        if self.feeder.is_some() {
            self.stop();
        }
    }
}

fn feed(
    mut audio_stream: ChildStdin,
    bytes: &[u8],
    looping: bool,
    stop_signal: &AtomicBool,
) -> io::Result<()> {
    loop {
        audio_stream.write_all(bytes)?;
        if !looping || stop_signal.load(Ordering::SeqCst) {
            break;
        }
    }
    // sox exits once the input stream is closed and everything is played
    audio_stream.flush()
}

/// Encode `wave` into the file at `path`, the format follows the file extension.
pub fn export(wave: &Wave, path: &Path) -> Result<()> {
    super::validate(wave)?;
    let file_error = |source: io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let (_, sox) = sox_binaries();
    let args = input_args(wave);
    debug!("spawning {} {} {}", sox.display(), args.join(" "), path.display());
    let mut converter = Command::new(&sox)
        .args(&args)
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(file_error)?;

    let written = take_stdin(&mut converter).and_then(|mut audio_stream| {
        audio_stream.write_all(&wave.to_bytes())?;
        audio_stream.flush()
    });
    let status = converter.wait().map_err(file_error)?;
    written.map_err(file_error)?;
    if !status.success() {
        let message = format!("sox exited with {}", status);
        return Err(file_error(io::Error::new(io::ErrorKind::Other, message)));
    }

    info!("saved {:.2} seconds of audio to {}", wave.duration(), path.display());
    Ok(())
}
