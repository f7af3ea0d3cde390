//! Test doubles shared by adapter and resolver tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use modelgate_core::{CredentialRecord, CredentialStore};
use modelgate_fetch::{FetchContext, FetchError, HttpRequest, HttpResponse, HttpTransport};

type Handler = dyn Fn(&HttpRequest) -> Result<HttpResponse, FetchError> + Send + Sync;

/// Transport that answers from a closure and records every request.
pub(crate) struct FakeTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, FetchError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let result = (self.handler)(&request);
        self.calls.lock().unwrap().push(request);
        result
    }
}

pub(crate) fn context(transport: &Arc<FakeTransport>) -> FetchContext {
    FetchContext::new(Arc::clone(transport) as Arc<dyn HttpTransport>)
}

pub(crate) fn amz_target(request: &HttpRequest) -> &str {
    request.header_str("x-amz-target").unwrap_or_default()
}

/// Credential store backed by a fixed list of records.
pub(crate) struct StaticStore(pub(crate) Vec<CredentialRecord>);

impl CredentialStore for StaticStore {
    fn get_by_id(&self, id: &str) -> Option<CredentialRecord> {
        self.0.iter().find(|record| record.id == id).cloned()
    }

    fn ids(&self) -> Vec<String> {
        self.0.iter().map(|record| record.id.clone()).collect()
    }
}
