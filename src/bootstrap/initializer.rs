//! Initializer contract
//!
//! The externally supplied capability that turns a fetched binary payload
//! into a live runtime handle. The loader treats it as opaque: any
//! conforming implementation is interchangeable, which is also what makes
//! the pipeline testable with stubs.

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use thiserror::Error;

use crate::asset::BinaryPayload;

/// Errors an initializer can surface while instantiating a module
#[derive(Debug, Error)]
pub enum InitializeError {
    #[error("Malformed module binary: {0}")]
    MalformedBinary(String),

    #[error("Unsupported module format: {0}")]
    UnsupportedFormat(String),

    #[error("Module instantiation failed: {0}")]
    Instantiation(String),
}

impl From<anyhow::Error> for InitializeError {
    fn from(e: anyhow::Error) -> Self {
        InitializeError::Instantiation(e.to_string())
    }
}

/// Capability that validates and instantiates a module from its payload
///
/// Implemented by the embedding application (or a stub in tests). The
/// handle is opaque to the loader: it is never inspected, cached, or
/// mutated here, and ownership passes entirely to the caller.
#[async_trait]
pub trait Initializer: Send + Sync {
    /// Runtime handle produced on successful instantiation
    type Handle: Send + 'static;

    /// Validate and instantiate the module from `payload`
    ///
    /// Invoked at most once per bootstrap, and only with a fully fetched
    /// payload.
    async fn initialize(&self, payload: BinaryPayload) -> Result<Self::Handle, InitializeError>;
}

/// Adapter exposing a plain async function as an [`Initializer`]
///
/// Keeps the "function value held in a variable" shape available to
/// embedders whose entry point is a free function rather than a type.
pub struct FnInitializer<H> {
    init: Box<dyn Fn(BinaryPayload) -> BoxFuture<'static, Result<H, InitializeError>> + Send + Sync>,
}

impl<H: Send + 'static> FnInitializer<H> {
    /// Wrap an async function as an initializer
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn(BinaryPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<H, InitializeError>> + Send + 'static,
    {
        Self {
            init: Box::new(move |payload| Box::pin(init(payload))),
        }
    }
}

#[async_trait]
impl<H: Send + 'static> Initializer for FnInitializer<H> {
    type Handle = H;

    async fn initialize(&self, payload: BinaryPayload) -> Result<H, InitializeError> {
        (self.init)(payload).await
    }
}
