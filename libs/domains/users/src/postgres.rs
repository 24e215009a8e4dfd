use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: sea_orm::DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i32,
    name: String,
    date_of_birth: NaiveDate,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            date_of_birth: row.date_of_birth,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedIdRow {
    id: i32,
}

fn store_err(e: sea_orm::DbErr) -> UserError {
    UserError::Store(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, name: &str, date_of_birth: NaiveDate) -> UserResult<i32> {
        let sql = "INSERT INTO users (name, date_of_birth) VALUES ($1, $2) RETURNING id";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [name.into(), date_of_birth.into()],
        );

        let row = InsertedIdRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or_else(|| UserError::Store("insert returned no id".to_string()))?;

        Ok(row.id)
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let sql = "SELECT id, name, date_of_birth FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>> {
        let sql = "SELECT id, name, date_of_birth FROM users ORDER BY id LIMIT $1 OFFSET $2";

        // Postgres rejects negative LIMIT/OFFSET, so clamp instead of
        // wrapping on the u64 -> i64 cast
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [limit.into(), offset.into()],
        );

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, id: i32, name: &str, date_of_birth: NaiveDate) -> UserResult<()> {
        let sql = "UPDATE users SET name = $1, date_of_birth = $2 WHERE id = $3";

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [name.into(), date_of_birth.into(), id.into()],
        );

        self.db.execute_raw(stmt).await.map_err(store_err)?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let sql = "DELETE FROM users WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self.db.execute_raw(stmt).await.map_err(store_err)?;

        Ok(result.rows_affected() > 0)
    }
}
