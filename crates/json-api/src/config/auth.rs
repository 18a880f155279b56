//! Auth Config

use clap::Args;

/// Identity provider settings. Bearer tokens are JWTs signed by the external
/// identity provider with a shared HS256 secret.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Shared secret for verifying HS256 bearer tokens
    #[arg(long, env = "AUTH_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}
