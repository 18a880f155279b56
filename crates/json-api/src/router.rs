//! App Router

use salvo::Router;

use crate::{appointments, auth, credits, customers, plans, services, subscriptions, tenant};

pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("tenant")
                .get(tenant::get::handler)
                .put(tenant::rename::handler),
        )
        .push(
            Router::with_path("customers")
                .get(customers::index::handler)
                .post(customers::create::handler)
                .push(
                    Router::with_path("{customer}")
                        .get(customers::get::handler)
                        .put(customers::update::handler)
                        .push(
                            Router::with_path("credits")
                                .get(credits::balance::handler)
                                .post(credits::grant::handler)
                                .push(Router::with_path("history").get(credits::history::handler))
                                .push(
                                    Router::with_path("purchase").post(credits::purchase::handler),
                                ),
                        )
                        .push(
                            Router::with_path("subscription")
                                .get(subscriptions::active::handler)
                                .put(subscriptions::subscribe::handler)
                                .delete(subscriptions::unsubscribe::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("services")
                .get(services::index::handler)
                .post(services::create::handler)
                .push(Router::with_path("{service}").get(services::get::handler)),
        )
        .push(
            Router::with_path("plans")
                .get(plans::index::handler)
                .post(plans::create::handler)
                .push(Router::with_path("{plan}").delete(plans::delete::handler)),
        )
        .push(
            // The static segments must stay ahead of the `{appointment}` capture.
            Router::with_path("appointments")
                .get(appointments::day::handler)
                .post(appointments::create::handler)
                .push(Router::with_path("month").get(appointments::month::handler))
                .push(Router::with_path("upcoming").get(appointments::upcoming::handler))
                .push(
                    Router::with_path("{appointment}")
                        .push(Router::with_path("cancel").post(appointments::cancel::handler))
                        .push(Router::with_path("complete").post(appointments::complete::handler)),
                ),
        )
}
