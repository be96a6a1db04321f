use crate::config::parameter;
use crate::dto::token_dto::{TokenClaimsDto, TokenReadDto};
use crate::error::token_error::TokenError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use rand::RngCore;

const JWT_PREFIX: &str = "Bearer ";

/// Sole source of truth for "is this caller authenticated, and with which
/// roles." Signs with HS256; the key lives for as long as this value does.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    token_expiration_minutes: i64,
}

pub trait TokenServiceTrait {
    fn new(secret: Vec<u8>, token_expiration_minutes: i64) -> Result<Self, TokenError>
    where
        Self: Sized;
    fn from_config() -> Result<Self, TokenError>
    where
        Self: Sized;
    fn issue(&self, subject: &str, roles: &[String]) -> Result<TokenReadDto, TokenError>;
    fn validate(&self, token: &str) -> bool;
    fn subject_of(&self, token: &str) -> Result<String, TokenError>;
    fn roles_of(&self, token: &str) -> Result<Vec<String>, TokenError>;
    fn retrieve_token_claims(&self, token: &str)
        -> jsonwebtoken::errors::Result<TokenData<TokenClaimsDto>>;
}

impl TokenServiceTrait for TokenService {
    fn new(secret: Vec<u8>, token_expiration_minutes: i64) -> Result<Self, TokenError> {
        // HS256 needs at least 256 bits of key material
        if secret.len() < 32 {
            return Err(TokenError::TokenCreationError(format!(
                "Signing secret must be at least 32 bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            token_expiration_minutes,
        })
    }

    /// Build from configuration. Without a configured `JWT_SECRET` a random
    /// key is generated, so every token dies with the process; multi-instance
    /// deployments and key rotation must set the parameter explicitly.
    fn from_config() -> Result<Self, TokenError> {
        let secret = match parameter::get_optional("JWT_SECRET") {
            Some(secret) => secret.into_bytes(),
            None => {
                let mut key = vec![0u8; 32];
                rand::thread_rng().fill_bytes(&mut key);
                tracing::warn!("JWT_SECRET not configured, generated a process-lifetime signing key");
                key
            }
        };

        Self::new(secret, parameter::get_i64("JWT_TTL_IN_MINUTES"))
    }

    fn issue(&self, subject: &str, roles: &[String]) -> Result<TokenReadDto, TokenError> {
        let iat = chrono::Utc::now().timestamp();
        let exp = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(self.token_expiration_minutes))
            .ok_or_else(|| {
                TokenError::TokenCreationError("Token expiration calculation overflow".to_string())
            })?
            .timestamp();

        let claims = TokenClaimsDto {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat,
            exp,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| TokenError::TokenCreationError(e.to_string()))?;

        Ok(TokenReadDto { token, iat, exp })
    }

    /// True only when the signature verifies and the expiry is in the future.
    /// Parse failures of any kind come back as false, never as an error.
    fn validate(&self, token: &str) -> bool {
        let token = token.strip_prefix(JWT_PREFIX).unwrap_or(token);
        self.retrieve_token_claims(token).is_ok()
    }

    fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        let token = token.strip_prefix(JWT_PREFIX).unwrap_or(token);
        let data = self
            .retrieve_token_claims(token)
            .map_err(|_| TokenError::InvalidToken(token.to_string()))?;
        Ok(data.claims.sub)
    }

    fn roles_of(&self, token: &str) -> Result<Vec<String>, TokenError> {
        let token = token.strip_prefix(JWT_PREFIX).unwrap_or(token);
        let data = self
            .retrieve_token_claims(token)
            .map_err(|_| TokenError::InvalidToken(token.to_string()))?;
        Ok(data.claims.roles)
    }

    fn retrieve_token_claims(
        &self,
        token: &str,
    ) -> jsonwebtoken::errors::Result<TokenData<TokenClaimsDto>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<TokenClaimsDto>(token, &DecodingKey::from_secret(&self.secret), &validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"0123456789abcdef0123456789abcdef".to_vec(), 600).unwrap()
    }

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_rejects_short_secret() {
        assert!(TokenService::new(b"too-short".to_vec(), 600).is_err());
    }

    #[test]
    fn test_issued_token_validates() {
        let service = service();
        let token = service.issue("alice", &roles(&["ROLE_USER"])).unwrap();
        assert!(service.validate(&token.token));
        assert_eq!(token.exp - token.iat, 600 * 60);
    }

    #[test]
    fn test_validate_accepts_bearer_prefix() {
        let service = service();
        let token = service.issue("alice", &roles(&["ROLE_USER"])).unwrap();
        assert!(service.validate(&format!("Bearer {}", token.token)));
    }

    #[test]
    fn test_subject_and_roles_round_trip() {
        let service = service();
        let issued_roles = roles(&["ROLE_ADMIN", "ROLE_USER", "ROLE_AUDITOR"]);
        let token = service.issue("bob", &issued_roles).unwrap();

        assert_eq!(service.subject_of(&token.token).unwrap(), "bob");
        // Claim order must survive the round trip
        assert_eq!(service.roles_of(&token.token).unwrap(), issued_roles);
    }

    #[test]
    fn test_expired_token_fails_validation() {
        let expired =
            TokenService::new(b"0123456789abcdef0123456789abcdef".to_vec(), -10).unwrap();
        let token = expired.issue("alice", &roles(&["ROLE_USER"])).unwrap();
        assert!(!expired.validate(&token.token));
        assert!(expired.subject_of(&token.token).is_err());
    }

    #[test]
    fn test_tampered_payload_fails_validation() {
        let service = service();
        let token = service.issue("alice", &roles(&["ROLE_USER"])).unwrap();

        let mut parts: Vec<String> = token.token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        let mid = payload.len() / 2;
        payload[mid] = if payload[mid] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();

        assert!(!service.validate(&parts.join(".")));
    }

    #[test]
    fn test_wrong_key_fails_validation() {
        let other =
            TokenService::new(b"ffffffffffffffffffffffffffffffff".to_vec(), 600).unwrap();
        let token = service().issue("alice", &roles(&["ROLE_USER"])).unwrap();
        assert!(!other.validate(&token.token));
    }

    #[test]
    fn test_garbage_input_is_false_not_panic() {
        let service = service();
        assert!(!service.validate("not-a-token"));
        assert!(!service.validate(""));
        assert!(!service.validate("Bearer "));
        assert!(service.subject_of("not-a-token").is_err());
        assert!(service.roles_of("not-a-token").is_err());
    }

    #[test]
    fn test_empty_role_list_round_trips() {
        let service = service();
        let token = service.issue("carol", &[]).unwrap();
        assert!(service.validate(&token.token));
        assert!(service.roles_of(&token.token).unwrap().is_empty());
    }
}
