use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_core::{CoreError, CoreResult, FlightDetails, NewReservation, Reservation, ReservationStore};

use crate::database::store_error;

pub struct PostgresReservationStore {
    pool: PgPool,
}

impl PostgresReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    flight_id: String,
    user_id: String,
    flight_details: Json<FlightDetails>,
    created_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            flight_id: row.flight_id,
            user_id: row.user_id,
            flight_details: row.flight_details.0,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ReservationStore for PostgresReservationStore {
    async fn create(&self, reservation: NewReservation) -> CoreResult<Reservation> {
        let id = Uuid::new_v4();

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (id, flight_id, user_id, flight_details, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING created_at
            "#,
        )
        .bind(id)
        .bind(&reservation.flight_id)
        .bind(&reservation.user_id)
        .bind(Json(&reservation.flight_details))
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(reservation.into_reservation(id, created_at))
    }

    async fn list_all(&self) -> CoreResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            "SELECT id, flight_id, user_id, flight_details, created_at FROM reservations ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("reservation {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_reservation(flight_id: &str) -> NewReservation {
        NewReservation {
            flight_id: flight_id.to_string(),
            user_id: "u1".to_string(),
            flight_details: FlightDetails::try_from(json!({ "id": flight_id, "gate": "D7" })).unwrap(),
        }
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore] // Requires a Postgres server at DATABASE_URL
    async fn test_list_keeps_insertion_order(pool: PgPool) {
        let store = PostgresReservationStore::new(pool);
        let first = store.create(new_reservation("KL123")).await.unwrap();
        let second = store.create(new_reservation("TK456")).await.unwrap();
        let third = store.create(new_reservation("KL123")).await.unwrap();

        let listed = store.list_all().await.unwrap();

        let ids: Vec<Uuid> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
        assert_eq!(listed[1], second);
    }

    #[sqlx::test(migrations = "../migrations")]
    #[ignore] // Requires a Postgres server at DATABASE_URL
    async fn test_delete_twice_is_not_found(pool: PgPool) {
        let store = PostgresReservationStore::new(pool);
        let kept = store.create(new_reservation("KL123")).await.unwrap();
        let removed = store.create(new_reservation("TK456")).await.unwrap();

        store.delete(removed.id).await.unwrap();
        let again = store.delete(removed.id).await;

        assert!(matches!(again, Err(CoreError::NotFound(_))));
        assert_eq!(store.list_all().await.unwrap(), vec![kept]);
    }
}
