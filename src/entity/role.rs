use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seed data: `ROLE_ADMIN` and `ROLE_USER`. Names are unique.
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}
