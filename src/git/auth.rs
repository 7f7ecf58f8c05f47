//! Git authentication configuration.

use git2::{Cred, RemoteCallbacks};

/// Authentication method for git remote operations.
#[derive(Debug, Clone, Default)]
pub enum GitAuth {
    /// Username and app password over HTTPS.
    Basic { username: String, password: String },
    /// Token-based authentication (token sent as the HTTPS username).
    Token(String),
    /// No authentication (public repositories, local remotes).
    #[default]
    None,
}

impl GitAuth {
    /// Basic auth with a username and app password.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Token-based auth.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Wire this auth method into transport callbacks for fetch and push.
    pub(crate) fn configure_callbacks(&self, callbacks: &mut RemoteCallbacks<'_>) {
        let auth = self.clone();

        callbacks.credentials(move |_url, username_from_url, allowed_types| match &auth {
            GitAuth::Basic { username, password } => Cred::userpass_plaintext(username, password),
            GitAuth::Token(token) => Cred::userpass_plaintext(token, ""),
            GitAuth::None => {
                if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                    Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                } else {
                    Cred::default()
                }
            }
        });

        callbacks.certificate_check(|_cert, _host| Ok(git2::CertificateCheckStatus::CertificateOk));
    }
}
