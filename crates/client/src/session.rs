use lms_core::Role;

/// Authenticated session context for API calls.
///
/// Plain value handed to the transport at construction time; there is no
/// global token store. Dropping the session (and the clients built from it)
/// is a logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    role: Role,
    user_id: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
            user_id: None,
        }
    }

    /// Attach the server-issued user id, when the login response carries one.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Bearer token for the `Authorization` header.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
