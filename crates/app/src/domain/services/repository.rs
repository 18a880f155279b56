//! Services Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::services::models::{Service, ServiceUuid};

const INSERT_SERVICE_SQL: &str = include_str!("sql/insert_service.sql");
const GET_SERVICE_SQL: &str = include_str!("sql/get_service.sql");
const LIST_SERVICES_SQL: &str = include_str!("sql/list_services.sql");
const SERVICE_EXISTS_SQL: &str = include_str!("sql/service_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgServicesRepository;

impl PgServicesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: ServiceUuid,
        name: &str,
        price: u64,
        duration_minutes: Option<i32>,
    ) -> Result<Service, sqlx::Error> {
        let price_i64 = i64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Service>(INSERT_SERVICE_SQL)
            .bind(service.into_uuid())
            .bind(name)
            .bind(price_i64)
            .bind(duration_minutes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_service(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: ServiceUuid,
    ) -> Result<Service, sqlx::Error> {
        query_as::<Postgres, Service>(GET_SERVICE_SQL)
            .bind(service.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_services(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Service>, sqlx::Error> {
        query_as::<Postgres, Service>(LIST_SERVICES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether the service is visible inside the current tenant context.
    pub(crate) async fn service_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service: ServiceUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(SERVICE_EXISTS_SQL)
            .bind(service.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Service {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ServiceUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price,
            duration_minutes: row.try_get("duration_minutes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
