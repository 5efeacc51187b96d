//! Shared error types for the services crate.

use thiserror::Error;

use client::ApiError;
use lms_core::ProgressError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    /// The remote refused the completion request. The local view is unchanged;
    /// the cause is passed through opaquely and never retried here.
    #[error("remote rejected the completion request")]
    RemoteRejected(#[source] ApiError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `CertificateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
