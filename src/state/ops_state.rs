use crate::config::ops_policy::OpsPolicy;
use crate::service::token_service::TokenService;

#[derive(Clone)]
pub struct OpsState {
    pub token_service: TokenService,
    pub policy: OpsPolicy,
}

impl OpsState {
    pub fn new(token_service: TokenService, policy: OpsPolicy) -> Self {
        Self { token_service, policy }
    }
}
