//! Shutdown signal listening for long running processes.
//!
//! The process boundary owns a [`ShutdownListener`] and decides what to do
//! once a signal arrives; [`exit_on_shutdown`] reproduces the usual
//! "log and exit" behaviour.

use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;

use crate::{Result, ScionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Hup,
    Int,
    Quit,
    Term,
    Usr1,
    Usr2,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::Hup,
        Signal::Int,
        Signal::Quit,
        Signal::Term,
        Signal::Usr1,
        Signal::Usr2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Signal::Hup => "SIGHUP",
            Signal::Int => "SIGINT",
            Signal::Quit => "SIGQUIT",
            Signal::Term => "SIGTERM",
            Signal::Usr1 => "SIGUSR1",
            Signal::Usr2 => "SIGUSR2",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of shutdown requests.
pub trait ShutdownListener {
    /// Wait for the next shutdown signal.
    fn recv(&mut self) -> impl Future<Output = Result<Signal>> + Send;
}

/// Listener for the operating system signals in [`Signal::ALL`].
#[cfg(unix)]
pub struct OsSignals {
    hup: tokio::signal::unix::Signal,
    int: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
    term: tokio::signal::unix::Signal,
    usr1: tokio::signal::unix::Signal,
    usr2: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl OsSignals {
    /// Install the signal handlers. Must be called within a tokio runtime.
    pub fn register() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            hup: signal(SignalKind::hangup())?,
            int: signal(SignalKind::interrupt())?,
            quit: signal(SignalKind::quit())?,
            term: signal(SignalKind::terminate())?,
            usr1: signal(SignalKind::user_defined1())?,
            usr2: signal(SignalKind::user_defined2())?,
        })
    }
}

#[cfg(unix)]
impl ShutdownListener for OsSignals {
    async fn recv(&mut self) -> Result<Signal> {
        let signal = tokio::select! {
            Some(()) = self.hup.recv() => Signal::Hup,
            Some(()) = self.int.recv() => Signal::Int,
            Some(()) = self.quit.recv() => Signal::Quit,
            Some(()) = self.term.recv() => Signal::Term,
            Some(()) = self.usr1.recv() => Signal::Usr1,
            Some(()) = self.usr2.recv() => Signal::Usr2,
            else => {
                return Err(anyhow::anyhow!("signal streams closed").into())
            }
        };
        Ok(signal)
    }
}

/// Sending half of a [`ShutdownChannel`].
#[derive(Clone, Debug)]
pub struct ShutdownTrigger {
    tx: mpsc::UnboundedSender<Signal>,
}

impl ShutdownTrigger {
    /// Returns false if the listener is gone.
    pub fn trigger(&self, signal: Signal) -> bool {
        self.tx.send(signal).is_ok()
    }
}

/// In-process listener, fed by a [`ShutdownTrigger`].
#[derive(Debug)]
pub struct ShutdownChannel {
    rx: mpsc::UnboundedReceiver<Signal>,
}

impl ShutdownChannel {
    pub fn channel() -> (ShutdownTrigger, ShutdownChannel) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ShutdownTrigger { tx }, ShutdownChannel { rx })
    }
}

impl ShutdownListener for ShutdownChannel {
    async fn recv(&mut self) -> Result<Signal> {
        self.rx.recv().await.ok_or_else(|| {
            ScionError::from(anyhow::anyhow!("shutdown trigger dropped"))
        })
    }
}

/// Wait for a shutdown signal and log it.
pub async fn wait_for_shutdown<L: ShutdownListener>(
    listener: &mut L,
) -> Result<Signal> {
    let signal = listener.recv().await?;
    log::info!("Received {}", signal);
    Ok(signal)
}

/// Wait for a shutdown signal, then exit the process immediately.
///
/// Exits with status 0 on a signal and 1 if the listener failed.
pub async fn exit_on_shutdown<L: ShutdownListener>(mut listener: L) {
    match wait_for_shutdown(&mut listener).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            log::error!("Failed to wait for shutdown signal: {}", e);
            std::process::exit(1)
        }
    }
}
