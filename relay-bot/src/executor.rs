//! Remote operation executor: runs the provider off the session task and normalizes the result.

use std::sync::Arc;

use generation_client::{GenerationProvider, OperationRequest, Payload};
use tracing::{debug, instrument};

/// Exactly one per executed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Success(Payload),
    /// The provider answered but produced nothing usable.
    Empty,
    /// The provider call failed; carries the cause for operators.
    Failure(String),
}

impl OperationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            OperationOutcome::Success(_) => "success",
            OperationOutcome::Empty => "empty",
            OperationOutcome::Failure(_) => "failure",
        }
    }
}

/// Single translation boundary between provider errors and [`OperationOutcome`].
#[derive(Clone)]
pub struct Executor {
    provider: Arc<dyn GenerationProvider>,
}

impl Executor {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// Runs the call on its own task so a slow or misbehaving provider cannot hold up the caller's
    /// task; a panic in the provider becomes `Failure`.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn execute(&self, request: &OperationRequest) -> OperationOutcome {
        let provider = Arc::clone(&self.provider);
        let owned = request.clone();
        let joined = tokio::spawn(async move { provider.generate(&owned).await }).await;

        let outcome = match joined {
            Ok(Ok(Some(payload))) if !payload.is_blank() => OperationOutcome::Success(payload),
            Ok(Ok(_)) => OperationOutcome::Empty,
            Ok(Err(e)) => OperationOutcome::Failure(format!("{:#}", e)),
            Err(e) => OperationOutcome::Failure(format!("Provider task failed: {}", e)),
        };
        debug!(outcome = outcome.label(), "Provider call settled");
        outcome
    }
}
