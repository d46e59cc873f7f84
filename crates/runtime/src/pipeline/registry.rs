//! Priority-ordered interceptor registry.

use std::sync::Arc;

use tracing::error;

use super::{Flow, InvocationContext, InvocationInterceptor};
use crate::error::{Result, RuntimeError};

/// Interceptors sorted by ascending priority.
///
/// The first one returning [`Flow::Handled`] short-circuits the rest.
#[derive(Clone, Default)]
pub struct InterceptorRegistry {
    interceptors: Arc<[Arc<dyn InvocationInterceptor>]>,
}

impl InterceptorRegistry {
    pub fn new(mut interceptors: Vec<Arc<dyn InvocationInterceptor>>) -> Self {
        interceptors.sort_by_key(|i| i.priority());
        Self {
            interceptors: interceptors.into(),
        }
    }

    /// First strike only.
    pub fn default_interceptors() -> Self {
        Self::new(vec![
            Arc::new(super::FirstStrikeInterceptor) as Arc<dyn InvocationInterceptor>,
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Runs interceptors until one handles the invocation.
    ///
    /// Returns the name of the handling interceptor.
    pub(super) fn run(&self, ctx: &mut InvocationContext<'_, '_>) -> Result<Option<&'static str>> {
        for interceptor in self.interceptors.iter() {
            match interceptor.intercept(ctx) {
                Ok(Flow::Continue) => continue,
                Ok(Flow::Handled) => return Ok(Some(interceptor.name())),
                Err(e) => {
                    error!(
                        target: "runtime::pipeline",
                        interceptor = interceptor.name(),
                        error = ?e,
                        "interceptor failed",
                    );
                    return Err(RuntimeError::Interceptor {
                        name: interceptor.name(),
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
