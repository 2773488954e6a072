use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

const INITIAL_BACKOFF: Duration = Duration::from_millis(50);

/// Removes a stored upload, retrying with exponential backoff when another
/// handle still pins the file. A file that is already gone counts as
/// removed. Returns whether the file is gone afterwards; the caller decides
/// how loudly to complain.
pub async fn remove_with_retry(path: &Path, max_retries: u32) -> bool {
    let mut backoff = INITIAL_BACKOFF;

    for attempt in 1..=max_retries {
        match tokio::fs::remove_file(path).await {
            Ok(()) => return true,
            Err(err) if err.kind() == ErrorKind::NotFound => return true,
            Err(err) => {
                tracing::debug!(path = %path.display(), attempt, %err, "remove failed");
            }
        }

        if attempt < max_retries {
            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }
    }

    false
}
