use anyhow::{Context, Result};

/// Runs blocking store or file work on tokio's blocking pool so the UI thread
/// keeps rendering. The closure's own error is kept and can be downcast.
pub async fn run_blocking<F, T, E>(f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let outcome = tokio::task::spawn_blocking(f)
        .await
        .context("background task did not complete")?;
    Ok(outcome?)
}
