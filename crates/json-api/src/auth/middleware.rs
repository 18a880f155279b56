//! Auth middleware.

use std::sync::Arc;

use navalha_app::domain::tenants::{TenantsServiceError, models::ActorUuid};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use crate::{auth::jwt, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let claims = match jwt::verify(token, &state.jwt_secret) {
        Ok(claims) => claims,
        Err(_error) => {
            res.render(StatusError::unauthorized().brief("Invalid bearer token"));

            return;
        }
    };

    debug!(actor = %claims.sub, email = claims.email.as_deref(), "bearer token verified");

    let context = match state
        .app
        .tenants
        .resolve_actor(ActorUuid::from_uuid(claims.sub))
        .await
    {
        Ok(context) => context,
        Err(TenantsServiceError::NoTenant) => {
            res.render(StatusError::unauthorized().brief("Actor is not linked to a tenant"));

            return;
        }
        Err(error) => {
            error!("failed to resolve actor tenant: {error}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_tenant_uuid(context.tenant);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
