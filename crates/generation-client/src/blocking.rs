//! Adapter that runs a synchronous provider on tokio's blocking thread pool.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::{GenerationProvider, OperationRequest, Payload};

/// Synchronous provider (e.g. a blocking HTTP SDK). Calls may block the thread for seconds.
pub trait BlockingGenerationProvider: Send + Sync + 'static {
    fn generate_blocking(&self, request: &OperationRequest) -> Result<Option<Payload>>;
}

/// Wraps a [`BlockingGenerationProvider`] so each call runs under `spawn_blocking`
/// and never stalls the async workers. A panic inside the call surfaces as `Err`.
pub struct Blocking<P> {
    inner: Arc<P>,
}

impl<P: BlockingGenerationProvider> Blocking<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

#[async_trait]
impl<P: BlockingGenerationProvider> GenerationProvider for Blocking<P> {
    async fn generate(&self, request: &OperationRequest) -> Result<Option<Payload>> {
        let inner = Arc::clone(&self.inner);
        let request = request.clone();
        tokio::task::spawn_blocking(move || inner.generate_blocking(&request))
            .await
            .map_err(|e| anyhow::anyhow!("Blocking provider task failed: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct SleepyEcho;

    impl BlockingGenerationProvider for SleepyEcho {
        fn generate_blocking(&self, request: &OperationRequest) -> Result<Option<Payload>> {
            std::thread::sleep(Duration::from_millis(50));
            Ok(Some(Payload::Text(request.prompt.clone())))
        }
    }

    struct Panicking;

    impl BlockingGenerationProvider for Panicking {
        fn generate_blocking(&self, _request: &OperationRequest) -> Result<Option<Payload>> {
            panic!("provider blew up");
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_blocking_call_does_not_stall_runtime() {
        let provider = Blocking::new(SleepyEcho);
        let ticker = tokio::spawn(async {
            let mut ticks = 0;
            for _ in 0..4 {
                tokio::time::sleep(Duration::from_millis(5)).await;
                ticks += 1;
            }
            ticks
        });

        let result = provider.generate(&OperationRequest::text("echo")).await.unwrap();

        assert_eq!(result, Some(Payload::Text("echo".to_string())));
        assert_eq!(ticker.await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_panic_becomes_error() {
        let provider = Blocking::new(Panicking);
        let result = provider.generate(&OperationRequest::image("x")).await;
        assert!(result.is_err());
    }
}
