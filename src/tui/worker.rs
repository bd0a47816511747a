//! Background workers for blocking calls.
//!
//! Network requests and dictation sessions run on their own threads so the
//! TUI main loop keeps drawing. Each worker reports exactly one message back
//! through an mpsc channel that the main loop polls every frame.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::application::AnalysisService;
use crate::domain::{AnalysisRequest, AnalysisResponse};
use crate::ports::{ApiError, ServiceHealth, SpeechError, SpeechRecognizer};

/// Result of polling a worker.
#[derive(Debug)]
pub enum WorkerPoll<T> {
    /// Still running.
    Pending,
    /// Finished with a value.
    Ready(T),
    /// The thread exited without reporting (it panicked).
    Lost,
}

/// Handle to a running worker thread.
pub struct WorkerHandle<T> {
    rx: Receiver<T>,
    _handle: JoinHandle<()>,
}

impl<T> WorkerHandle<T> {
    /// Check for the worker's result without blocking.
    #[must_use]
    pub fn try_recv(&self) -> WorkerPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => WorkerPoll::Ready(value),
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => WorkerPoll::Lost,
        }
    }
}

fn spawn_job<T, F>(job: F) -> WorkerHandle<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        // The receiver is gone if the app quit first.
        let _ = tx.send(job());
    });
    WorkerHandle {
        rx,
        _handle: handle,
    }
}

/// Outcome of one analysis submission.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Complete {
        response: AnalysisResponse,
        completed_at: DateTime<Local>,
    },
    Failed(ApiError),
}

/// Worker that sends one analysis request.
pub struct AnalysisWorker;

impl AnalysisWorker {
    /// Spawn the request; a successful result is held back for `display_delay`.
    pub fn spawn(
        service: AnalysisService,
        request: AnalysisRequest,
        display_delay: Duration,
    ) -> WorkerHandle<AnalysisOutcome> {
        spawn_job(move || match service.run(request) {
            Ok(response) => {
                if !display_delay.is_zero() {
                    thread::sleep(display_delay);
                }
                AnalysisOutcome::Complete {
                    response,
                    completed_at: Local::now(),
                }
            }
            Err(e) => AnalysisOutcome::Failed(e),
        })
    }
}

/// Worker that runs one dictation session.
pub struct DictationWorker;

impl DictationWorker {
    pub fn spawn(
        recognizer: Arc<dyn SpeechRecognizer>,
        locale: String,
    ) -> WorkerHandle<Result<String, SpeechError>> {
        spawn_job(move || recognizer.recognize_once(&locale))
    }
}

/// Worker that probes the service health endpoint once.
pub struct HealthProbe;

impl HealthProbe {
    pub fn spawn(service: AnalysisService) -> WorkerHandle<Result<ServiceHealth, ApiError>> {
        spawn_job(move || service.health())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::ScriptedApi;
    use std::time::Instant;

    fn wait<T>(handle: &WorkerHandle<T>) -> WorkerPoll<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match handle.try_recv() {
                WorkerPoll::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                other => return other,
            }
        }
    }

    #[test]
    fn test_job_result_is_delivered() {
        let handle = spawn_job(|| 41 + 1);
        assert!(matches!(wait(&handle), WorkerPoll::Ready(42)));
    }

    #[test]
    fn test_panicking_job_is_lost() {
        let handle = spawn_job(|| -> u8 { panic!("worker blew up") });
        assert!(matches!(wait(&handle), WorkerPoll::Lost));
    }

    #[test]
    fn test_slow_job_is_pending() {
        let handle = spawn_job(|| thread::sleep(Duration::from_millis(200)));
        assert!(matches!(handle.try_recv(), WorkerPoll::Pending));
        assert!(matches!(wait(&handle), WorkerPoll::Ready(())));
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(vec![], "Aspirin", vec![], "en").unwrap()
    }

    #[test]
    fn test_success_is_held_for_display_delay() {
        let api = ScriptedApi::succeeding(AnalysisResponse::default());
        let delay = Duration::from_millis(500);
        let started = Instant::now();

        let handle = AnalysisWorker::spawn(AnalysisService::new(api.clone()), request(), delay);
        thread::sleep(Duration::from_millis(50));
        assert!(matches!(handle.try_recv(), WorkerPoll::Pending));

        assert!(matches!(
            wait(&handle),
            WorkerPoll::Ready(AnalysisOutcome::Complete { .. })
        ));
        assert!(started.elapsed() >= delay);
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_failure_skips_display_delay() {
        let api = ScriptedApi::failing(ApiError::Timeout(120));
        // Longer than the wait deadline: a delayed failure would come back Pending.
        let delay = Duration::from_secs(30);

        let handle = AnalysisWorker::spawn(AnalysisService::new(api), request(), delay);
        assert!(matches!(
            wait(&handle),
            WorkerPoll::Ready(AnalysisOutcome::Failed(ApiError::Timeout(120)))
        ));
    }
}
