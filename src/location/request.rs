//! Bounded fix request.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::{Accuracy, CancelToken, FixRequest, LocationError, LocationSource};
use crate::constants::FIX_WAIT_SLICE_MS;
use crate::geo::GeoFix;

/// Ask `source` for permission, then for one fix, waiting at most `timeout`.
///
/// The provider runs on a worker thread. If the deadline passes or `cancel` is
/// set first, the worker's own token is cancelled and the call returns
/// [`LocationError::Timeout`]; a provider that ignores cancellation is abandoned.
/// The returned fix is stamped with `requested_at`.
pub fn request_fix(
    source: &Arc<dyn LocationSource>,
    accuracy: Accuracy,
    timeout: Duration,
    requested_at: DateTime<Utc>,
    cancel: &CancelToken,
) -> Result<GeoFix, LocationError> {
    if !source.request_permission(accuracy) {
        log_debug!("{} denied {} location access", source.name(), accuracy.as_str());
        return Err(LocationError::PermissionDenied);
    }

    let worker_cancel = CancelToken::new();
    let request = FixRequest {
        accuracy,
        cancel: worker_cancel.clone(),
    };
    let worker_source = Arc::clone(source);
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("location-fix".to_string())
        .spawn(move || {
            // Receiver may be gone after a timeout
            let _ = tx.send(worker_source.get_fix(&request));
        })
        .map_err(|e| LocationError::Unavailable(format!("failed to start location query: {e}")))?;

    let deadline = Instant::now() + timeout;
    let slice = Duration::from_millis(FIX_WAIT_SLICE_MS);

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() || cancel.is_cancelled() {
            worker_cancel.cancel();
            log_debug!("Gave up waiting for {} after {}ms", source.name(), timeout.as_millis());
            return Err(LocationError::Timeout(timeout));
        }

        match rx.recv_timeout(remaining.min(slice)) {
            Ok(Ok(coordinates)) => return Ok(GeoFix::new(coordinates, requested_at)),
            Ok(Err(LocationError::Timeout(_))) => return Err(LocationError::Timeout(timeout)),
            Ok(Err(e)) => return Err(e),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                return Err(LocationError::Unavailable(
                    "location provider stopped without answering".to_string(),
                ));
            }
        }
    }
}
