//! PostgreSQL-backed `OrderRepository` implementation using Diesel ORM.
//!
//! Reads join the owning user so the HTTP representation can embed the
//! owner snapshot without a second round-trip.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OrderPersistenceError, OrderRepository};
use crate::domain::{NewOrder, Order, OrderPatch, OrderWithOwner};

use super::error_mapping;
use super::models::{NewOrderRow, OrderChangeset, OrderRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{orders, users};

/// Diesel-backed implementation of the order repository port.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrderPersistenceError {
    error_mapping::map_pool_error(error, OrderPersistenceError::connection)
}

/// Map Diesel errors, treating a foreign key violation as a missing owner.
/// The `user_id` column carries the table's only foreign key.
fn map_diesel_error(error: diesel::result::Error) -> OrderPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) = &error {
        return OrderPersistenceError::OwnerMissing;
    }
    error_mapping::map_diesel_error(
        error,
        OrderPersistenceError::query,
        OrderPersistenceError::connection,
    )
}

fn join_rows(rows: Vec<(OrderRow, UserRow)>) -> Vec<OrderWithOwner> {
    rows.into_iter()
        .map(|(order, owner)| OrderWithOwner {
            order: order.into(),
            owner: owner.into(),
        })
        .collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn list(&self) -> Result<Vec<OrderWithOwner>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(OrderRow, UserRow)> = orders::table
            .inner_join(users::table)
            .order((orders::created_at.desc(), orders::id.desc()))
            .select((OrderRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(join_rows(rows))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderWithOwner>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = orders::table
            .inner_join(users::table)
            .filter(orders::id.eq(id))
            .select((OrderRow::as_select(), UserRow::as_select()))
            .first::<(OrderRow, UserRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(order, owner)| OrderWithOwner {
            order: order.into(),
            owner: owner.into(),
        }))
    }

    async fn insert(&self, new_order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let row = NewOrderRow {
            title: &new_order.title,
            description: &new_order.description,
            user_id: new_order.user_id,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(orders::table)
            .values(&row)
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .map(Order::from)
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: i32,
        patch: &OrderPatch,
    ) -> Result<Option<Order>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = OrderChangeset {
            title: patch.title.as_deref(),
            description: patch.description.as_deref(),
            user_id: patch.user_id,
            updated_at: Utc::now(),
        };

        diesel::update(orders::table.find(id))
            .set(&changes)
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Order::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: i32) -> Result<bool, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(orders::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<OrderWithOwner>, OrderPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(OrderRow, UserRow)> = orders::table
            .inner_join(users::table)
            .filter(orders::user_id.eq(user_id))
            .order((orders::created_at.desc(), orders::id.desc()))
            .select((OrderRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(join_rows(rows))
    }
}
