use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct TokenReadDto {
    pub token: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims embedded in every issued token. `roles` keeps the order the
/// authenticator supplied.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}
