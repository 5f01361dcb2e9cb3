//! Operator interrupt handling.
//!
//! The client has no shutdown API of its own; an interrupt simply wins the
//! race against the running session.

use tokio::signal;

/// Resolves when SIGINT or SIGTERM (Ctrl+C on Windows) arrives.
pub async fn wait_for_interrupt() -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    Ok(())
}
