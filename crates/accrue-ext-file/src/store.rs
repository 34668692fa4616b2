//! JSON deposit book.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use accrue_core::types::{Date, Deposit, Money};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// DEPOSIT BOOK
// =============================================================================

/// All deposits of one user, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepositBook {
    /// Deposit records.
    #[serde(default)]
    pub deposits: Vec<Deposit>,
}

impl DepositBook {
    /// Looks up a deposit by identifier.
    pub fn get(&self, id: &str) -> Option<&Deposit> {
        self.deposits.iter().find(|d| d.id == id)
    }

    /// Looks up a deposit by identifier for modification.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Deposit> {
        self.deposits.iter_mut().find(|d| d.id == id)
    }

    /// Finds a deposit by display name and bank.
    pub fn find_by_name_and_bank(&self, name: &str, bank: &str) -> Option<&Deposit> {
        self.deposits.iter().find(|d| d.name == name && d.bank == bank)
    }

    /// Number of deposits.
    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    /// True when the book holds no deposits.
    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    /// Iterates over the deposits.
    pub fn iter(&self) -> std::slice::Iter<'_, Deposit> {
        self.deposits.iter()
    }
}

impl<'a> IntoIterator for &'a DepositBook {
    type Item = &'a Deposit;
    type IntoIter = std::slice::Iter<'a, Deposit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds an identifier from a display name: lower-case slug plus a random suffix.
pub fn generate_deposit_id(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    let suffix = Uuid::new_v4().simple().to_string();
    if slug.is_empty() {
        suffix[..8].to_string()
    } else {
        format!("{slug}-{}", &suffix[..8])
    }
}

// =============================================================================
// JSON DEPOSIT STORE
// =============================================================================

/// Deposit book persisted as a single JSON file.
///
/// Every operation reloads the file, so external edits between calls are seen.
#[derive(Debug, Clone)]
pub struct JsonDepositStore {
    path: PathBuf,
}

impl JsonDepositStore {
    /// Creates a store over `path`. The file need not exist yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the deposit book. A missing file is an empty book.
    pub fn load(&self) -> StoreResult<DepositBook> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("deposit file {} not found, starting empty", self.path.display());
                return Ok(DepositBook::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the deposit book, replacing the file atomically.
    pub fn save(&self, book: &DepositBook) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let content = serde_json::to_string_pretty(book).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.temp_path();
        fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        log::debug!("saved {} deposits to {}", book.len(), self.path.display());
        Ok(())
    }

    /// Fetches one deposit.
    pub fn get(&self, id: &str) -> StoreResult<Deposit> {
        self.load()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Adds a deposit and returns it as stored.
    ///
    /// An empty identifier is replaced by a generated one; both timestamps are set.
    pub fn insert(&self, mut deposit: Deposit) -> StoreResult<Deposit> {
        let mut book = self.load()?;

        if deposit.id.is_empty() {
            deposit.id = generate_deposit_id(&deposit.name);
        }
        if book.get(&deposit.id).is_some() {
            return Err(StoreError::Duplicate { id: deposit.id });
        }

        let now = Utc::now();
        deposit.created_at = Some(now);
        deposit.updated_at = Some(now);

        book.deposits.push(deposit.clone());
        self.save(&book)?;
        log::info!("created deposit {} ({})", deposit.id, deposit.name);
        Ok(deposit)
    }

    /// Adds `delta` to the principal of deposit `id` and returns the updated record.
    pub fn update_amount(&self, id: &str, delta: Money) -> StoreResult<Deposit> {
        self.credit(id, delta, |_| {})
    }

    /// Credits the maturity interest of a term deposit and marks it paid on `paid_on`.
    pub fn pay_maturity(&self, id: &str, interest: Money, paid_on: Date) -> StoreResult<Deposit> {
        self.credit(id, interest, |deposit| {
            deposit.maturity_paid_on = Some(paid_on.to_string());
        })
    }

    fn credit(
        &self,
        id: &str,
        delta: Money,
        mark: impl FnOnce(&mut Deposit),
    ) -> StoreResult<Deposit> {
        let mut book = self.load()?;
        let deposit = book.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;

        deposit.amount = deposit
            .amount
            .checked_add(delta)
            .ok_or_else(|| StoreError::AmountOverflow { id: id.to_string() })?;
        mark(deposit);
        deposit.updated_at = Some(Utc::now());
        let updated = deposit.clone();

        self.save(&book)?;
        log::info!("deposit {id}: amount changed by {delta}, now {}", updated.amount);
        Ok(updated)
    }

    /// Replaces a stored deposit, keeping its creation timestamp.
    pub fn update(&self, mut deposit: Deposit) -> StoreResult<Deposit> {
        let mut book = self.load()?;
        let slot = book
            .get_mut(&deposit.id)
            .ok_or_else(|| StoreError::not_found(&deposit.id))?;

        deposit.created_at = slot.created_at;
        deposit.updated_at = Some(Utc::now());
        *slot = deposit.clone();

        self.save(&book)?;
        Ok(deposit)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "deposits".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}
