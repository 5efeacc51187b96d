#![forbid(unsafe_code)]

pub mod certificate_service;
pub mod error;
pub mod progress_service;

pub use certificate_service::CertificateService;
pub use error::{CertificateError, ProgressServiceError};
pub use progress_service::{CourseView, ProgressService};
