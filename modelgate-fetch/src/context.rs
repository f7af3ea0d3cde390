//! Fetch context carrying the transport, time budget, and cancellation.
//!
//! Every outbound call goes through [`FetchContext::send`], which bounds the
//! call by the per-call timeout and the context deadline, and aborts as soon
//! as the caller cancels.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::host::http::{HttpClient, HttpRequest, HttpResponse, HttpTransport};

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Timeout for a single outbound call, measured from call start.
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetchSettings {
    /// Creates settings with custom timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context passed to usage adapters.
#[derive(Clone)]
pub struct FetchContext {
    /// HTTP transport.
    pub http: Arc<dyn HttpTransport>,
    /// Fetch settings.
    pub settings: FetchSettings,
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl FetchContext {
    /// Creates a context over `http` with default settings.
    pub fn new(http: Arc<dyn HttpTransport>) -> Self {
        Self {
            http,
            settings: FetchSettings::default(),
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Returns the overall deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the cancellation token observed by this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Returns true once the caller has cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Derives a context for one resolution.
    ///
    /// The child shares the transport, is cancelled when the parent is, and
    /// must finish within one timeout from now (or the parent deadline, if
    /// that comes first). A timeout too large to represent as an instant
    /// leaves the child bounded only by the parent deadline.
    pub fn child(&self) -> Self {
        let budget_end = Instant::now().checked_add(self.settings.timeout);
        let deadline = match (self.deadline, budget_end) {
            (Some(parent), Some(end)) => Some(parent.min(end)),
            (parent, None) => parent,
            (None, end) => end,
        };

        Self {
            http: Arc::clone(&self.http),
            settings: self.settings.clone(),
            cancel: self.cancel.child_token(),
            deadline,
        }
    }

    /// Time left for the next call.
    fn call_budget(&self) -> Duration {
        match self.deadline {
            Some(deadline) => self
                .settings
                .timeout
                .min(deadline.saturating_duration_since(Instant::now())),
            None => self.settings.timeout,
        }
    }

    /// Sends a request within the current time budget.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] if the context is cancelled before or
    /// during the call, [`FetchError::Timeout`] if the budget runs out, or the
    /// transport's own error.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let budget = self.call_budget();
        if budget.is_zero() {
            warn!(url = %request.url, "Deadline already passed");
            return Err(FetchError::Timeout(budget));
        }

        let url = request.url.clone();
        debug!(url = %url, budget_ms = budget.as_millis(), "Dispatching request");

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                warn!(url = %url, "Request cancelled by caller");
                Err(FetchError::Cancelled)
            }
            result = tokio::time::timeout(budget, self.http.execute(request)) => {
                result.unwrap_or_else(|_| {
                    warn!(url = %url, timeout_ms = budget.as_millis(), "Request timed out");
                    Err(FetchError::Timeout(budget))
                })
            }
        }
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .field("deadline", &self.deadline)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
#[derive(Default)]
pub struct FetchContextBuilder {
    http: Option<Arc<dyn HttpTransport>>,
    settings: FetchSettings,
    cancel: Option<CancellationToken>,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP transport.
    #[must_use]
    pub fn http(mut self, http: Arc<dyn HttpTransport>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the fetch settings.
    #[must_use]
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Ties the context to an external cancellation token.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Builds the fetch context.
    ///
    /// Without an explicit transport a reqwest [`HttpClient`] is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the default HTTP client cannot be built.
    pub fn build(self) -> Result<FetchContext, FetchError> {
        let http: Arc<dyn HttpTransport> = match self.http {
            Some(http) => http,
            None => Arc::new(HttpClient::with_timeout(self.settings.timeout)?),
        };

        Ok(FetchContext {
            http,
            settings: self.settings,
            cancel: self.cancel.unwrap_or_default(),
            deadline: None,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport that answers after a fixed delay.
    struct DelayedTransport {
        delay: Duration,
        calls: AtomicUsize,
    }

    impl DelayedTransport {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                delay,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl HttpTransport for DelayedTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(HttpResponse::new(200, "{}"))
        }
    }

    fn ctx_with(transport: Arc<DelayedTransport>, timeout: Duration) -> FetchContext {
        FetchContext::builder()
            .http(transport)
            .timeout(timeout)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_settings() {
        assert_eq!(FetchSettings::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_context_builder() {
        let ctx = ctx_with(
            DelayedTransport::new(Duration::ZERO),
            Duration::from_secs(60),
        );
        assert_eq!(ctx.timeout(), Duration::from_secs(60));
        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_send_success() {
        let transport = DelayedTransport::new(Duration::ZERO);
        let ctx = ctx_with(Arc::clone(&transport), Duration::from_secs(5));

        let response = ctx.send(HttpRequest::get("https://example.com")).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let ctx = ctx_with(
            DelayedTransport::new(Duration::from_secs(5)),
            Duration::from_millis(50),
        );

        let err = ctx
            .send(HttpRequest::get("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_send_makes_no_call() {
        let transport = DelayedTransport::new(Duration::ZERO);
        let ctx = ctx_with(Arc::clone(&transport), Duration::from_secs(5));
        ctx.cancellation_token().cancel();

        let err = ctx
            .send(HttpRequest::get("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Cancelled));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_send() {
        let ctx = ctx_with(
            DelayedTransport::new(Duration::from_secs(5)),
            Duration::from_secs(10),
        );
        let token = ctx.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        let err = ctx
            .send(HttpRequest::get("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Cancelled));
    }

    #[tokio::test]
    async fn test_child_follows_parent_cancellation() {
        let ctx = ctx_with(DelayedTransport::new(Duration::ZERO), Duration::from_secs(5));
        let child = ctx.child();
        assert!(child.deadline().is_some());

        ctx.cancellation_token().cancel();
        assert!(child.is_cancelled());
    }

    #[tokio::test]
    async fn test_child_cancel_leaves_parent() {
        let ctx = ctx_with(DelayedTransport::new(Duration::ZERO), Duration::from_secs(5));
        let child = ctx.child();
        child.cancellation_token().cancel();
        assert!(!ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_deadline_spans_calls() {
        let ctx = ctx_with(
            DelayedTransport::new(Duration::from_millis(60)),
            Duration::from_millis(100),
        );
        let child = ctx.child();

        // First call fits; the second runs into the shared deadline.
        assert!(child.send(HttpRequest::get("https://example.com")).await.is_ok());
        let err = child
            .send(HttpRequest::get("https://example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_child_with_unrepresentable_timeout() {
        let transport = DelayedTransport::new(Duration::ZERO);
        let ctx = ctx_with(Arc::clone(&transport), Duration::from_secs(u64::MAX));

        let child = ctx.child();
        assert!(child.deadline().is_none());
        assert!(child.send(HttpRequest::get("https://example.com")).await.is_ok());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_child_keeps_earlier_parent_deadline() {
        let ctx = ctx_with(DelayedTransport::new(Duration::ZERO), Duration::from_secs(5));
        let parent = ctx.child();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let grandchild = parent.child();
        assert_eq!(grandchild.deadline(), parent.deadline());
    }
}
