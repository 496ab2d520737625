/// Opaque per-request credentials handed over by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    session_token: Option<String>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            session_token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }
}
