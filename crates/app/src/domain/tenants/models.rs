//! Tenant Models

use jiff::{Timestamp, civil::Time};

use crate::uuids::TypedUuid;

/// Tenant UUID
pub type TenantUuid = TypedUuid<Tenant>;

/// Actor UUID, the subject identifier issued by the external identity provider.
pub type ActorUuid = TypedUuid<Profile>;

/// Tenant Model
#[derive(Debug, Clone)]
pub struct Tenant {
    pub uuid: TenantUuid,
    pub name: String,
    pub slug: String,
    pub default_appointment_time: Time,
    pub created_at: Timestamp,
}

/// Profile Model, linking an authenticated actor to a tenant.
#[derive(Debug, Clone)]
pub struct Profile {
    pub uuid: ActorUuid,
    pub full_name: String,
    pub role: String,
    pub tenant_uuid: Option<TenantUuid>,
    pub created_at: Timestamp,
}

/// Resolved tenant scope for one actor. Every downstream operation takes the
/// `tenant` field from here rather than a caller-supplied id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant: TenantUuid,
    pub actor: ActorUuid,
    pub full_name: String,
    pub role: String,
}

/// Provisioning request for a brand-new signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioning {
    pub actor: ActorUuid,
    pub full_name: String,
    pub tenant_name: String,

    /// Explicit slug override; derived from `tenant_name` when absent.
    pub slug: Option<String>,
}

/// Derive a URL-safe slug from a tenant display name.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "tenant".to_string()
    } else {
        slug.to_string()
    }
}
