//! Who the API calls are made as.
//!
//! Signing in happens elsewhere. Whatever did it leaves a session file with
//! the bearer token and the signed-in user; docket only reads it and passes
//! the resulting [`Session`] to [`crate::api::ApiClient`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocketError, DocketResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// "lawyer", "client", "admin"
    #[serde(default)]
    pub role: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Session {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Load the session file. A missing file is an anonymous session.
    pub fn load(path: &Path) -> DocketResult<Self> {
        if !path.exists() {
            return Ok(Session::anonymous());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| DocketError::Config(format!("Invalid session file {}: {e}", path.display())))
    }

    /// Token to send, ignoring blank values.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::load(&dir.path().join("session.toml")).unwrap();
        assert_eq!(session, Session::anonymous());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn loads_token_and_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(
            &path,
            "token = \"abc123\"\n\n[user]\nid = \"u1\"\nname = \"Dana Reyes\"\nrole = \"lawyer\"\n",
        )
        .unwrap();

        let session = Session::load(&path).unwrap();
        assert_eq!(session.bearer(), Some("abc123"));
        assert_eq!(session.user.unwrap().name, "Dana Reyes");
    }

    #[test]
    fn blank_token_is_not_sent() {
        assert_eq!(Session::with_token("  ").bearer(), None);
        assert_eq!(Session::with_token("t").bearer(), Some("t"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "token = [").unwrap();
        assert!(matches!(Session::load(&path), Err(DocketError::Config(_))));
    }
}
