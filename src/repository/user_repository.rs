use crate::config::database::{Database, DatabaseTrait};
use crate::entity::user::User;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

const USER_COLUMNS: &str = "u.id, u.name, u.password, r.name AS role, u.created_at, u.updated_at";

#[derive(Clone)]
pub struct UserRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait UserRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find(&self, id: Uuid) -> Result<User, Error>;
    async fn find_by_name(&self, name: String) -> Option<User>;
    async fn name_exists(&self, name: String) -> Result<bool, Error>;
    async fn all(&self) -> Result<Vec<User>, Error>;
    async fn create(&self, id: Uuid, name: &str, password_hash: &str, role: &str) -> Result<(), Error>;
    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        password_hash: Option<&str>,
        role: Option<&str>,
    ) -> Result<(), Error>;
    async fn delete(&self, id: Uuid) -> Result<(), Error>;
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find(&self, id: Uuid) -> Result<User, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u LEFT JOIN roles r ON r.id = u.role_id WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn find_by_name(&self, name: String) -> Option<User> {
        match sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u LEFT JOIN roles r ON r.id = u.role_id WHERE u.name = $1"
        ))
        .bind(&name)
        .fetch_optional(self.db_conn.get_pool())
        .await
        {
            Ok(user) => user,
            Err(e) => {
                error!("User lookup by name failed: {}", e);
                None
            }
        }
    }

    async fn name_exists(&self, name: String) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE name = $1)")
            .bind(&name)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn all(&self) -> Result<Vec<User>, Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u LEFT JOIN roles r ON r.id = u.role_id ORDER BY u.name"
        ))
        .fetch_all(self.db_conn.get_pool())
        .await
    }

    async fn create(&self, id: Uuid, name: &str, password_hash: &str, role: &str) -> Result<(), Error> {
        sqlx::query(
            "INSERT INTO users (id, name, password, role_id) \
             VALUES ($1, $2, $3, (SELECT id FROM roles WHERE name = $4))",
        )
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .bind(role)
        .execute(self.db_conn.get_pool())
        .await?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        password_hash: Option<&str>,
        role: Option<&str>,
    ) -> Result<(), Error> {
        sqlx::query(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                password = COALESCE($3, password), \
                role_id = COALESCE((SELECT id FROM roles WHERE name = $4), role_id), \
                updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .bind(role)
        .execute(self.db_conn.get_pool())
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        // The role reference is cleared before the row goes away so the
        // association never dangles mid-deletion.
        let mut tx = self.db_conn.get_pool().begin().await?;

        sqlx::query("UPDATE users SET role_id = NULL WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
}
