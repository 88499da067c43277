use tokio::select;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;

async fn stop_signal() {
    let mut sigint = signal(SignalKind::interrupt()).unwrap();
    let mut sigterm = signal(SignalKind::terminate()).unwrap();

    select! {
        _ = sigint.recv() => (),
        _ = sigterm.recv() => (),
    }
}

/// Token cancelled on SIGINT/SIGTERM. The server stops accepting once it
/// trips; in-flight requests complete or are abandoned with the process.
pub fn shutdown() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        stop_signal().await;
        token_clone.cancel();
    });

    token
}
