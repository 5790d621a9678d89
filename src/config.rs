use std::path::PathBuf;

use crate::util::object::Provider;

/// Static key pair handed to the SDK instead of its default provider chain.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Everything needed to build a backend client. Unset fields fall back to
/// the SDK's own defaults (environment, profile files, metadata service).
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub provider: Provider,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub profile: Option<String>,
    pub credentials: Option<Credentials>,
    pub credentials_file: Option<PathBuf>,
    pub force_path_style: bool,
}

impl StoreConfig {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            region: None,
            endpoint: None,
            profile: None,
            credentials: None,
            credentials_file: None,
            force_path_style: false,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}
