// gentone -- generate a tone from a note or frequency
// Copyright (C) 2026  The gentone developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turning termination requests into a cancellation flag.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{info, warn};

/// Set `cancel` once the process is asked to terminate (SIGINT or SIGTERM).
///
/// The handlers are installed before this returns. The flag is set before
/// anything is logged, so a caller holding the stdout lock still sees it.
pub fn listen(cancel: Arc<AtomicBool>) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let termination = {
        let _context = runtime.enter();
        Termination::install()?
    };
    thread::spawn(move || match runtime.block_on(termination.wait()) {
        Ok(()) => {
            cancel.store(true, Ordering::SeqCst);
            info!("interrupted");
        }
        Err(err) => warn!("failed to listen for interrupts: {}", err),
    });
    Ok(())
}

#[cfg(unix)]
struct Termination {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Termination {
    fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Termination {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn wait(mut self) -> io::Result<()> {
        tokio::select! {
            _ = self.interrupt.recv() => Ok(()),
            _ = self.terminate.recv() => Ok(()),
        }
    }
}

#[cfg(not(unix))]
struct Termination;

#[cfg(not(unix))]
impl Termination {
    fn install() -> io::Result<Self> {
        Ok(Termination)
    }

    async fn wait(self) -> io::Result<()> {
        tokio::signal::ctrl_c().await
    }
}
