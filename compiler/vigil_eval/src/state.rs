//! Per-execution evaluation state.

use crate::EvalResult;
use vigil_tsdb::{Context, Request, ResponseSet};

/// State owned by one `execute` call and handed to every built-in.
///
/// Holds the query context and the backend requests built-ins register
/// while the tree is walked. Never shared between executions.
pub struct EvalState<'c> {
    context: &'c dyn Context,
    requests: Vec<Request>,
}

impl<'c> EvalState<'c> {
    pub fn new(context: &'c dyn Context) -> Self {
        EvalState {
            context,
            requests: Vec::new(),
        }
    }

    pub fn context(&self) -> &'c dyn Context {
        self.context
    }

    /// Record a request the expression depends on.
    pub fn add_request(&mut self, request: Request) {
        self.requests.push(request);
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Run `request` against the context and record it.
    pub fn query(&mut self, request: Request) -> EvalResult<ResponseSet> {
        let responses = self.context.query(&request)?;
        self.add_request(request);
        Ok(responses)
    }

    pub fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}
