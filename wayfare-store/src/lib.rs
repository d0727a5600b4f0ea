pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod reservation_repo;
pub mod memory;
pub mod schiphol;
pub mod redis_repo;

pub use database::DbClient;
pub use flight_repo::PostgresFlightStore;
pub use reservation_repo::PostgresReservationStore;
pub use memory::{InMemoryFlightStore, InMemoryReservationStore};
pub use schiphol::SchipholClient;
pub use redis_repo::RedisClient;
