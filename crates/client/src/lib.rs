#![forbid(unsafe_code)]

pub mod api;
pub mod fake;
pub mod http;
pub mod session;

pub use api::{ApiError, CertificateIssued, RemoteChapterProgress, RemoteProgress, StudentApi};
pub use fake::InMemoryStudentApi;
pub use http::HttpStudentApi;
pub use session::Session;
