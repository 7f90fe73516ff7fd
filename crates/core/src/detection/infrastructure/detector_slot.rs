use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Instant;

use crate::detection::domain::detection::Detection;
use crate::detection::domain::detection_error::DetectionError;
use crate::detection::domain::detector_state::DetectorState;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::pixel_buffer::PixelBuffer;

/// Result of a detector loader.
pub type LoadResult = Result<Box<dyn FaceDetector>, Box<dyn std::error::Error + Send + Sync>>;

/// Explicitly constructed holder for a face detector that must be loaded
/// before first use.
///
/// Moves through `Unloaded -> Loading -> Ready | Failed`. A failed slot may
/// be loaded again. Handles are cheap to clone and share one detector.
/// Detecting through a slot that is not `Ready` returns
/// [`DetectionError::NotReady`].
#[derive(Clone)]
pub struct DetectorSlot {
    inner: Arc<SlotInner>,
}

struct SlotInner {
    state: Mutex<SlotState>,
    ready: Condvar,
}

enum SlotState {
    Unloaded,
    Loading,
    Ready(Box<dyn FaceDetector>),
    Failed(String),
}

impl SlotState {
    fn kind(&self) -> DetectorState {
        match self {
            SlotState::Unloaded => DetectorState::Unloaded,
            SlotState::Loading => DetectorState::Loading,
            SlotState::Ready(_) => DetectorState::Ready,
            SlotState::Failed(_) => DetectorState::Failed,
        }
    }
}

impl DetectorSlot {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SlotInner {
                state: Mutex::new(SlotState::Unloaded),
                ready: Condvar::new(),
            }),
        }
    }

    pub fn state(&self) -> DetectorState {
        self.inner.lock().kind()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == DetectorState::Ready
    }

    /// Runs `loader` on a background thread. Use [`wait_ready`](Self::wait_ready)
    /// to block until it settles.
    pub fn load<F>(&self, loader: F) -> Result<(), DetectionError>
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        self.inner.begin_loading()?;
        let inner = self.inner.clone();
        thread::spawn(move || inner.finish(run_loader(loader)));
        Ok(())
    }

    /// Runs `loader` on the calling thread and reports the outcome.
    pub fn load_blocking<F>(&self, loader: F) -> Result<(), DetectionError>
    where
        F: FnOnce() -> LoadResult,
    {
        self.inner.begin_loading()?;
        self.inner.finish(run_loader(loader));
        self.wait_ready()
    }

    /// Blocks while loading. Returns `Ok` once ready, the load error if it
    /// failed, or `NotReady` if loading was never started.
    pub fn wait_ready(&self) -> Result<(), DetectionError> {
        let guard = self.inner.lock();
        let guard = self
            .inner
            .ready
            .wait_while(guard, |s| matches!(s, SlotState::Loading))
            .unwrap_or_else(PoisonError::into_inner);
        match &*guard {
            SlotState::Ready(_) => Ok(()),
            SlotState::Failed(message) => Err(DetectionError::LoadFailed(message.clone())),
            other => Err(DetectionError::NotReady(other.kind())),
        }
    }
}

impl Default for DetectorSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotInner {
    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_loading(&self) -> Result<(), DetectionError> {
        let mut state = self.lock();
        match state.kind() {
            current @ (DetectorState::Loading | DetectorState::Ready) => {
                Err(DetectionError::AlreadyStarted(current))
            }
            DetectorState::Unloaded | DetectorState::Failed => {
                *state = SlotState::Loading;
                Ok(())
            }
        }
    }

    fn finish(&self, outcome: SlotState) {
        *self.lock() = outcome;
        self.ready.notify_all();
    }
}

fn run_loader<F>(loader: F) -> SlotState
where
    F: FnOnce() -> LoadResult,
{
    log::info!("Loading face detector...");
    let start = Instant::now();
    match panic::catch_unwind(AssertUnwindSafe(loader)) {
        Ok(Ok(detector)) => {
            log::info!(
                "Face detector loaded in {:.2}s",
                start.elapsed().as_secs_f64()
            );
            SlotState::Ready(detector)
        }
        Ok(Err(e)) => {
            log::error!("Error loading face detector: {e}");
            SlotState::Failed(e.to_string())
        }
        Err(_) => {
            log::error!("Face detector loader panicked");
            SlotState::Failed("loader panicked".to_string())
        }
    }
}

impl FaceDetector for DetectorSlot {
    fn detect(
        &mut self,
        buffer: &PixelBuffer,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let mut state = self.inner.lock();
        match &mut *state {
            SlotState::Ready(detector) => detector.detect(buffer),
            other => Err(DetectionError::NotReady(other.kind()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::rectangle::Rectangle;
    use std::sync::mpsc;

    struct StubDetector {
        detections: Vec<Detection>,
    }

    impl FaceDetector for StubDetector {
        fn detect(
            &mut self,
            _buffer: &PixelBuffer,
        ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Ok(self.detections.clone())
        }
    }

    fn stub_loader() -> LoadResult {
        Ok(Box::new(StubDetector {
            detections: vec![Detection::new(
                Rectangle::new(1.0, 2.0, 3.0, 4.0),
                Some(0.9),
            )],
        }))
    }

    fn buffer() -> PixelBuffer {
        PixelBuffer::filled(4, 4, [0, 0, 0, 255])
    }

    #[test]
    fn test_new_slot_is_unloaded() {
        let slot = DetectorSlot::new();
        assert_eq!(slot.state(), DetectorState::Unloaded);
        assert!(!slot.is_ready());
    }

    #[test]
    fn test_detect_before_load_is_not_ready() {
        let mut slot = DetectorSlot::new();
        let err = slot.detect(&buffer()).unwrap_err();
        let err = err.downcast_ref::<DetectionError>().unwrap();
        assert!(matches!(
            err,
            DetectionError::NotReady(DetectorState::Unloaded)
        ));
    }

    #[test]
    fn test_wait_ready_without_load_is_not_ready() {
        let slot = DetectorSlot::new();
        assert!(matches!(
            slot.wait_ready(),
            Err(DetectionError::NotReady(DetectorState::Unloaded))
        ));
    }

    #[test]
    fn test_load_blocking_makes_slot_ready() {
        let mut slot = DetectorSlot::new();
        slot.load_blocking(stub_loader).unwrap();
        assert_eq!(slot.state(), DetectorState::Ready);
        assert_eq!(slot.detect(&buffer()).unwrap().len(), 1);
    }

    #[test]
    fn test_background_load_reports_loading_then_ready() {
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let slot = DetectorSlot::new();
        slot.load(move || {
            release_rx.recv().ok();
            stub_loader()
        })
        .unwrap();

        assert_eq!(slot.state(), DetectorState::Loading);
        release_tx.send(()).unwrap();
        slot.wait_ready().unwrap();
        assert_eq!(slot.state(), DetectorState::Ready);
    }

    #[test]
    fn test_failed_load_is_reported_and_retryable() {
        let mut slot = DetectorSlot::new();
        let err = slot
            .load_blocking(|| Err("model file missing".into()))
            .unwrap_err();
        assert!(matches!(err, DetectionError::LoadFailed(ref m) if m == "model file missing"));
        assert_eq!(slot.state(), DetectorState::Failed);

        let err = slot.detect(&buffer()).unwrap_err();
        assert!(err.to_string().contains("failed"));

        slot.load_blocking(stub_loader).unwrap();
        assert!(slot.is_ready());
    }

    #[test]
    fn test_panicking_loader_fails_instead_of_hanging() {
        let slot = DetectorSlot::new();
        slot.load(|| panic!("boom")).unwrap();
        assert!(matches!(
            slot.wait_ready(),
            Err(DetectionError::LoadFailed(_))
        ));
    }

    #[test]
    fn test_second_load_is_rejected() {
        let slot = DetectorSlot::new();
        slot.load_blocking(stub_loader).unwrap();
        assert!(matches!(
            slot.load_blocking(stub_loader),
            Err(DetectionError::AlreadyStarted(DetectorState::Ready))
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let slot = DetectorSlot::new();
        let handle = slot.clone();
        slot.load_blocking(stub_loader).unwrap();
        assert!(handle.is_ready());
    }
}
