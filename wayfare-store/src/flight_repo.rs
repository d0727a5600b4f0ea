use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use wayfare_core::{CoreError, CoreResult, Flight, FlightDetails, FlightStore};

use crate::database::store_error;

pub struct PostgresFlightStore {
    pool: PgPool,
}

impl PostgresFlightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlightStore for PostgresFlightStore {
    async fn ingest_or_replace(&self, flight: &Flight) -> CoreResult<()> {
        // `||` overwrites the top-level keys carried by the new document and
        // keeps the rest (e.g. the reservation counter).
        sqlx::query(
            r#"
            INSERT INTO flights (id, document)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
            SET document = flights.document || EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(&flight.id)
        .bind(Json(flight))
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        debug!(flight_id = %flight.id, "Flight upserted");
        Ok(())
    }

    async fn patch_existing(&self, id: &str, details: &FlightDetails) -> CoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE flights
            SET document = document || $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(details))
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("flight {}", id)));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> CoreResult<Option<FlightDetails>> {
        let document = sqlx::query_scalar::<_, Json<FlightDetails>>("SELECT document FROM flights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(document.map(|d| d.0))
    }
}
