//! Demo records and how they are loaded.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A bank account, the record every demo queries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    pub fn new(name: impl Into<String>, address: impl Into<String>, balance: f64) -> Self {
        Account {
            name: name.into(),
            address: address.into(),
            balance,
        }
    }

    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }
}

/// The name and address of an account holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub name: String,
    pub address: String,
}

impl From<Account> for Customer {
    fn from(account: Account) -> Self {
        Customer {
            name: account.name,
            address: account.address,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads a JSON array of accounts.
pub fn load_accounts(path: &Path) -> Result<Vec<Account>, AccountsError> {
    let file = File::open(path).map_err(|source| AccountsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let accounts: Vec<Account> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| AccountsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), accounts = accounts.len(), "loaded accounts");
    Ok(accounts)
}

/// Built-in accounts used when no file is given.
pub fn sample_accounts() -> Vec<Account> {
    vec![
        Account::new("Alice", "12 Harbor Rd", -125.50),
        Account::new("Bob", "4 Mill Lane", 310.00),
        Account::new("Anton", "88 Quarry St", -12.75),
        Account::new("Cathy", "9 Orchard Way", 0.0),
        Account::new("Peter", "1 Wilco Way", -48.00),
        Account::new("Peter", "2 Wilco Way", 15.25),
        Account::new("Roger", "1 Wilco Way", 92.10),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn overdrawn_means_negative() {
        assert!(Account::new("a", "b", -0.01).is_overdrawn());
        assert!(!Account::new("a", "b", 0.0).is_overdrawn());
    }

    #[test]
    fn customer_from_account() {
        let customer = Customer::from(Account::new("Roger", "1 Wilco Way", 3.0));
        assert_eq!(customer.name, "Roger");
        assert_eq!(customer.address, "1 Wilco Way");
    }

    #[test]
    fn load_accounts_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Zoe", "address": "7 Rue", "balance": -3.5}},
                {{"name": "Yan", "address": "8 Rue"}}]"#
        )
        .unwrap();

        let accounts = load_accounts(file.path()).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].balance, -3.5);
        assert_eq!(accounts[1].balance, 0.0);
    }

    #[test]
    fn load_accounts_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_accounts(file.path()).unwrap_err();
        assert!(matches!(err, AccountsError::Parse { .. }));
    }

    #[test]
    fn load_accounts_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_accounts(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AccountsError::Open { .. }));
    }
}
