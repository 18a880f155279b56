//! Test helpers.

use std::sync::Arc;

use jiff::{
    Timestamp,
    civil::{date, time},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, errors::Error as JwtError};
use salvo::{affix_state::inject, prelude::*};
use serde::Serialize;
use uuid::Uuid;

use navalha_app::{
    context::AppContext,
    domain::{
        appointments::{
            MockAppointmentsService,
            models::{Appointment, AppointmentDetails, AppointmentStatus, AppointmentUuid},
        },
        credits::MockCreditsService,
        customers::{
            MockCustomersService,
            models::{Customer, CustomerUuid},
        },
        plans::{
            MockPlansService,
            models::{Plan, PlanUuid},
        },
        services::{
            MockServicesService,
            models::{Service as CatalogService, ServiceUuid},
        },
        subscriptions::{
            MockSubscriptionsService,
            models::{Subscription, SubscriptionStatus, SubscriptionUuid},
        },
        tenants::{
            MockTenantsService,
            models::{Tenant, TenantUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_TENANT_UUID: TenantUuid = TenantUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_JWT_SECRET: &str = "test-secret";

// 2100-01-01T00:00:00Z
const TOKEN_EXPIRY: i64 = 4_102_444_800;

#[derive(Serialize)]
struct TokenClaims {
    sub: Uuid,
    exp: i64,
}

/// Sign a bearer token the way the identity provider would.
pub(crate) fn make_token(secret: &str, actor: Uuid) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        &TokenClaims {
            sub: actor,
            exp: TOKEN_EXPIRY,
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Place the test tenant scope in the depot, standing in for the auth
/// middleware.
#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant_uuid(TEST_TENANT_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_tenants_mock() -> MockTenantsService {
    let mut tenants = MockTenantsService::new();

    tenants.expect_provision().never();
    tenants.expect_resolve_actor().never();
    tenants.expect_get_tenant().never();
    tenants.expect_rename_tenant().never();
    tenants.expect_list_tenants().never();

    tenants
}

fn strict_customers_mock() -> MockCustomersService {
    let mut customers = MockCustomersService::new();

    customers.expect_create_customer().never();
    customers.expect_update_customer().never();
    customers.expect_get_customer().never();
    customers.expect_list_customers().never();

    customers
}

fn strict_services_mock() -> MockServicesService {
    let mut services = MockServicesService::new();

    services.expect_create_service().never();
    services.expect_get_service().never();
    services.expect_list_services().never();

    services
}

fn strict_plans_mock() -> MockPlansService {
    let mut plans = MockPlansService::new();

    plans.expect_create_plan().never();
    plans.expect_list_plans().never();
    plans.expect_delete_plan().never();

    plans
}

fn strict_credits_mock() -> MockCreditsService {
    let mut credits = MockCreditsService::new();

    credits.expect_grant().never();
    credits.expect_consume().never();
    credits.expect_buy_package().never();
    credits.expect_balance().never();
    credits.expect_history().never();
    credits.expect_rebuild_balance().never();

    credits
}

fn strict_subscriptions_mock() -> MockSubscriptionsService {
    let mut subscriptions = MockSubscriptionsService::new();

    subscriptions.expect_subscribe().never();
    subscriptions.expect_unsubscribe().never();
    subscriptions.expect_active_for_customer().never();
    subscriptions.expect_renew().never();
    subscriptions.expect_renew_due().never();

    subscriptions
}

fn strict_appointments_mock() -> MockAppointmentsService {
    let mut appointments = MockAppointmentsService::new();

    appointments.expect_create_appointment().never();
    appointments.expect_complete_appointment().never();
    appointments.expect_cancel_appointment().never();
    appointments.expect_list_for_day().never();
    appointments.expect_list_for_month().never();
    appointments.expect_list_upcoming().never();

    appointments
}

struct MockServices {
    tenants: MockTenantsService,
    customers: MockCustomersService,
    services: MockServicesService,
    plans: MockPlansService,
    credits: MockCreditsService,
    subscriptions: MockSubscriptionsService,
    appointments: MockAppointmentsService,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            tenants: strict_tenants_mock(),
            customers: strict_customers_mock(),
            services: strict_services_mock(),
            plans: strict_plans_mock(),
            credits: strict_credits_mock(),
            subscriptions: strict_subscriptions_mock(),
            appointments: strict_appointments_mock(),
        }
    }
}

fn state_from(mocks: MockServices) -> Arc<State> {
    Arc::new(State::new(
        AppContext {
            tenants: Arc::new(mocks.tenants),
            customers: Arc::new(mocks.customers),
            services: Arc::new(mocks.services),
            plans: Arc::new(mocks.plans),
            credits: Arc::new(mocks.credits),
            subscriptions: Arc::new(mocks.subscriptions),
            appointments: Arc::new(mocks.appointments),
        },
        TEST_JWT_SECRET.to_string(),
    ))
}

pub(crate) fn state_with_tenants(tenants: MockTenantsService) -> Arc<State> {
    state_from(MockServices {
        tenants,
        ..MockServices::default()
    })
}

pub(crate) fn state_with_customers(customers: MockCustomersService) -> Arc<State> {
    state_from(MockServices {
        customers,
        ..MockServices::default()
    })
}

pub(crate) fn state_with_services(services: MockServicesService) -> Arc<State> {
    state_from(MockServices {
        services,
        ..MockServices::default()
    })
}

pub(crate) fn state_with_plans(plans: MockPlansService) -> Arc<State> {
    state_from(MockServices {
        plans,
        ..MockServices::default()
    })
}

pub(crate) fn state_with_credits(credits: MockCreditsService) -> Arc<State> {
    state_from(MockServices {
        credits,
        ..MockServices::default()
    })
}

pub(crate) fn state_with_subscriptions(subscriptions: MockSubscriptionsService) -> Arc<State> {
    state_from(MockServices {
        subscriptions,
        ..MockServices::default()
    })
}

pub(crate) fn state_with_appointments(appointments: MockAppointmentsService) -> Arc<State> {
    state_from(MockServices {
        appointments,
        ..MockServices::default()
    })
}

fn tenant_scoped_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_tenant)
            .push(route),
    )
}

pub(crate) fn tenant_service(tenants: MockTenantsService, route: Router) -> Service {
    tenant_scoped_service(state_with_tenants(tenants), route)
}

pub(crate) fn customers_service(customers: MockCustomersService, route: Router) -> Service {
    tenant_scoped_service(state_with_customers(customers), route)
}

pub(crate) fn services_service(services: MockServicesService, route: Router) -> Service {
    tenant_scoped_service(state_with_services(services), route)
}

pub(crate) fn plans_service(plans: MockPlansService, route: Router) -> Service {
    tenant_scoped_service(state_with_plans(plans), route)
}

pub(crate) fn credits_service(credits: MockCreditsService, route: Router) -> Service {
    tenant_scoped_service(state_with_credits(credits), route)
}

pub(crate) fn subscriptions_service(
    subscriptions: MockSubscriptionsService,
    route: Router,
) -> Service {
    tenant_scoped_service(state_with_subscriptions(subscriptions), route)
}

pub(crate) fn appointments_service(appointments: MockAppointmentsService, route: Router) -> Service {
    tenant_scoped_service(state_with_appointments(appointments), route)
}

pub(crate) fn make_tenant(uuid: TenantUuid) -> Tenant {
    Tenant {
        uuid,
        name: "Test Shop".to_string(),
        slug: "test-shop".to_string(),
        default_appointment_time: time(9, 0, 0, 0),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_customer(uuid: CustomerUuid) -> Customer {
    Customer {
        uuid,
        name: "Test Customer".to_string(),
        phone: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_catalog_service(uuid: ServiceUuid) -> CatalogService {
    CatalogService {
        uuid,
        name: "Haircut".to_string(),
        price: 5000,
        duration_minutes: Some(30),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_plan(uuid: PlanUuid) -> Plan {
    Plan {
        uuid,
        name: "Gold".to_string(),
        price: 9900,
        credits_per_month: 4,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_subscription(
    uuid: SubscriptionUuid,
    customer: CustomerUuid,
    plan: PlanUuid,
) -> Subscription {
    Subscription {
        uuid,
        customer_uuid: customer,
        plan_uuid: plan,
        status: SubscriptionStatus::Active,
        next_billing_date: Some(date(2024, 4, 15)),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_appointment(
    uuid: AppointmentUuid,
    customer: CustomerUuid,
    service: ServiceUuid,
) -> Appointment {
    Appointment {
        uuid,
        customer_uuid: customer,
        service_uuid: service,
        scheduled_at: Timestamp::UNIX_EPOCH,
        status: AppointmentStatus::Scheduled,
        used_credit: false,
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_appointment_details(
    uuid: AppointmentUuid,
    customer: CustomerUuid,
    service: ServiceUuid,
) -> AppointmentDetails {
    AppointmentDetails {
        appointment: make_appointment(uuid, customer, service),
        customer_name: "Test Customer".to_string(),
        customer_phone: None,
        service_name: "Haircut".to_string(),
        service_price: 5000,
    }
}
