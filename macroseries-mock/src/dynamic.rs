use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use macroseries_core::{DataSource, Frequency, RawObservation, SeriesError, SeriesRequest};

/// Instruction for how a request should be answered.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Return the provided records immediately.
    Return(Vec<RawObservation>),
    /// Fail immediately with the provided error.
    Fail(SeriesError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior>,
    requests: Vec<SeriesRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for requests with the given series key (e.g. `Q.KR.NGDP_SA_XDC`).
    pub async fn set_behavior(&self, key: impl Into<String>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(key.into(), behavior);
    }

    /// Return a copy of every request received so far.
    pub async fn requests(&self) -> Vec<SeriesRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn DataSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn DataSource>, controller)
    }
}

#[async_trait]
impl DataSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supported_frequencies(&self) -> &'static [Frequency] {
        &Frequency::CONCRETE
    }

    async fn observations(
        &self,
        req: &SeriesRequest,
    ) -> Result<Vec<RawObservation>, SeriesError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            guard.rules.get(&req.key()).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(records)) => Ok(records),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(SeriesError::not_found(req.key())),
        }
    }
}
