//! Single-user bearer authentication: password check, token issuing and the
//! per-request gate in front of protected handlers.

pub mod gate;
pub mod password;
pub mod token;

use serde::Serialize;

use crate::config::AuthConfig;

pub use gate::CurrentUser;
pub use token::Claims;

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub username: String,
}

/// Where known identities come from.
pub trait PrincipalRegistry {
    /// Resolves a token subject to a principal, if the subject is known.
    fn resolve(&self, subject: &str) -> Option<Principal>;

    /// The stored password hash for `username`, if the user exists.
    fn password_hash(&self, username: &str) -> Option<&str>;
}

/// Exactly one configured user.
impl PrincipalRegistry for AuthConfig {
    fn resolve(&self, subject: &str) -> Option<Principal> {
        (subject == self.username).then(|| Principal {
            username: self.username.clone(),
        })
    }

    fn password_hash(&self, username: &str) -> Option<&str> {
        (username == self.username).then_some(self.password_hash.as_str())
    }
}
