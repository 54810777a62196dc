//! # Core Domain Entities
//!
//! Identifiers and world-state records as the ledger stores them.
//!
//! ## Clusters
//!
//! - **Identity**: `Name`, `DomainId`, `AccountId`
//! - **World State**: `Domain`, `NewDomain`, `Metadata`, `IpfsPath`

use crate::errors::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Validated identifier: non-empty, no whitespace, no `@` or `#`.
///
/// `@` and `#` are reserved as separators in composite identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate and wrap an identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let reason = if name.is_empty() {
            Some("must not be empty")
        } else if name.chars().any(char::is_whitespace) {
            Some("must not contain whitespace")
        } else if name.contains('@') || name.contains('#') {
            Some("must not contain `@` or `#`")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ModelError::InvalidName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl FromStr for Name {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DomainId {
    /// Domain name.
    pub name: Name,
}

impl DomainId {
    /// Create a domain id.
    pub fn new(name: Name) -> Self {
        Self { name }
    }
}

impl FromStr for DomainId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.parse()?))
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Identifier of an account: a name inside a domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId {
    /// Account name.
    pub name: Name,
    /// Domain where the account is registered.
    pub domain_id: DomainId,
}

impl AccountId {
    /// Create an account id.
    pub fn new(name: Name, domain_id: DomainId) -> Self {
        Self { name, domain_id }
    }
}

impl FromStr for AccountId {
    type Err = ModelError;

    /// Parse `name@domain`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, domain) = s
            .split_once('@')
            .ok_or_else(|| ModelError::InvalidAccountId(s.to_string()))?;
        Ok(Self::new(name.parse()?, domain.parse()?))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.domain_id)
    }
}

// =============================================================================
// CLUSTER B: WORLD STATE
// =============================================================================

/// Key-value metadata attached to ledger entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Entries, ordered by key so encodings are canonical.
    pub map: BTreeMap<Name, String>,
}

impl Metadata {
    /// Empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value.
    pub fn insert(&mut self, key: Name, value: impl Into<String>) -> Option<String> {
        self.map.insert(key, value.into())
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// IPFS path of a domain logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpfsPath(pub String);

/// Descriptor submitted to register a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDomain {
    /// Identifier of the domain to create.
    pub id: DomainId,
    /// Initial metadata.
    pub metadata: Metadata,
    /// Optional logo.
    pub logo: Option<IpfsPath>,
}

impl NewDomain {
    /// A domain with empty metadata and no logo.
    pub fn new(id: DomainId) -> Self {
        Self {
            id,
            metadata: Metadata::new(),
            logo: None,
        }
    }

    /// Attach a logo.
    pub fn with_logo(mut self, logo: IpfsPath) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Replace the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A registered domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Identifier.
    pub id: DomainId,
    /// Accounts registered in this domain.
    pub accounts: Vec<AccountId>,
    /// Metadata.
    pub metadata: Metadata,
    /// Optional logo.
    pub logo: Option<IpfsPath>,
}

impl From<NewDomain> for Domain {
    fn from(new_domain: NewDomain) -> Self {
        Self {
            id: new_domain.id,
            accounts: Vec::new(),
            metadata: new_domain.metadata,
            logo: new_domain.logo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(Name::new("looking_glass").is_ok());
        assert!(matches!(
            Name::new(""),
            Err(ModelError::InvalidName { reason: "must not be empty", .. })
        ));
        assert!(Name::new("looking glass").is_err());
        assert!(Name::new("alice@wonderland").is_err());
        assert!(Name::new("rose#wonderland").is_err());
    }

    #[test]
    fn test_account_id_parse_and_display() {
        let account: AccountId = "alice@wonderland".parse().unwrap();
        assert_eq!(account.name.as_str(), "alice");
        assert_eq!(account.domain_id.name.as_str(), "wonderland");
        assert_eq!(account.to_string(), "alice@wonderland");

        assert!(matches!(
            "alice".parse::<AccountId>(),
            Err(ModelError::InvalidAccountId(_))
        ));
        assert!("alice@".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_name_deserialization_validates() {
        assert!(serde_json::from_str::<Name>("\"ok\"").is_ok());
        assert!(serde_json::from_str::<Name>("\"not ok\"").is_err());
    }

    #[test]
    fn test_new_domain_defaults() {
        let new_domain = NewDomain::new("looking_glass".parse().unwrap());
        assert!(new_domain.metadata.is_empty());
        assert!(new_domain.logo.is_none());

        let domain = Domain::from(new_domain);
        assert!(domain.accounts.is_empty());
        assert_eq!(domain.id.to_string(), "looking_glass");
    }
}
