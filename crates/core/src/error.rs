use thiserror::Error;

use crate::model::RoleParseError;
use crate::progress::ProgressError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    RoleParse(#[from] RoleParseError),
}
