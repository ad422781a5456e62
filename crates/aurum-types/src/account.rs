//! Account identifiers.

use serde::{Deserialize, Serialize};

/// Opaque address of an external party: an investor, the sale wallet, a
/// vesting beneficiary, or the vault's own token account.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id() {
        let id = AccountId::generate();
        assert!(!id.0.is_empty());
        assert_eq!(format!("{}", AccountId::new("wallet-1")), "wallet-1");
    }
}
