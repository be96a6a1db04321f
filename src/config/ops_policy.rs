use crate::config::parameter;
use std::collections::HashMap;
use tracing::warn;

/// Required-role table for the ops surface.
///
/// Every ops operation needs a role from this table before the handler runs.
/// `OPS_DEFAULT_ROLE` covers operations without an explicit entry;
/// `OPS_ROLE_OVERRIDES` lists exceptions as `operation=role` pairs separated
/// by commas, e.g. `OPS_ROLE_OVERRIDES=roles=ROLE_USER`.
#[derive(Clone, Debug)]
pub struct OpsPolicy {
    default_role: String,
    overrides: HashMap<String, String>,
}

impl OpsPolicy {
    pub fn new(default_role: String, overrides: HashMap<String, String>) -> Self {
        Self { default_role, overrides }
    }

    pub fn from_config() -> Self {
        let default_role = parameter::get("OPS_DEFAULT_ROLE");
        let overrides = parameter::get_optional("OPS_ROLE_OVERRIDES")
            .map(|raw| Self::parse_overrides(&raw))
            .unwrap_or_default();
        Self::new(default_role, overrides)
    }

    fn parse_overrides(raw: &str) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
            match entry.split_once('=') {
                Some((operation, role)) if !role.trim().is_empty() => {
                    overrides.insert(operation.trim().to_string(), role.trim().to_string());
                }
                _ => warn!("Ignoring malformed ops role override: {}", entry),
            }
        }
        overrides
    }

    /// The role a caller must hold to invoke the named operation.
    pub fn required_role(&self, operation: &str) -> &str {
        self.overrides
            .get(operation)
            .map(String::as_str)
            .unwrap_or(&self.default_role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_applies_to_unknown_operations() {
        let policy = OpsPolicy::new("ROLE_ADMIN".to_string(), HashMap::new());
        assert_eq!(policy.required_role("users"), "ROLE_ADMIN");
        assert_eq!(policy.required_role("anything"), "ROLE_ADMIN");
    }

    #[test]
    fn test_override_wins_for_named_operation() {
        let overrides = OpsPolicy::parse_overrides("roles=ROLE_USER, users = ROLE_ADMIN");
        let policy = OpsPolicy::new("ROLE_ADMIN".to_string(), overrides);
        assert_eq!(policy.required_role("roles"), "ROLE_USER");
        assert_eq!(policy.required_role("users"), "ROLE_ADMIN");
    }

    #[test]
    fn test_malformed_override_entries_are_ignored() {
        let overrides = OpsPolicy::parse_overrides("nonsense,users=,roles=ROLE_USER");
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("roles").map(String::as_str), Some("ROLE_USER"));
    }
}
