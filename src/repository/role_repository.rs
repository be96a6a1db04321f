use crate::config::database::{Database, DatabaseTrait};
use crate::entity::role::Role;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct RoleRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait RoleRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find(&self, id: Uuid) -> Result<Role, Error>;
    async fn find_by_name(&self, name: String) -> Result<Option<Role>, Error>;
    async fn all(&self) -> Result<Vec<Role>, Error>;
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find(&self, id: Uuid) -> Result<Role, Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn find_by_name(&self, name: String) -> Result<Option<Role>, Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = $1")
            .bind(&name)
            .fetch_optional(self.db_conn.get_pool())
            .await
    }

    async fn all(&self) -> Result<Vec<Role>, Error> {
        sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY name")
            .fetch_all(self.db_conn.get_pool())
            .await
    }
}
