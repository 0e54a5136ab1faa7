use std::collections::{HashMap, HashSet};

use spdlog::{debug, trace, warn};
use steem_error::SteemError;

use crate::{
    authority::{Authority, AuthorityRole, RequiredAuthorities},
    config::ChainConfig,
    crypto::PublicKey,
    name::AccountName,
};

/// Source of account authorities, usually backed by a node query.
pub trait AuthorityLookup {
    fn lookup(&self, account: &AccountName, role: AuthorityRole) -> Result<Authority, SteemError>;
}

impl<F> AuthorityLookup for F
where
    F: Fn(&AccountName, AuthorityRole) -> Result<Authority, SteemError>,
{
    fn lookup(&self, account: &AccountName, role: AuthorityRole) -> Result<Authority, SteemError> {
        self(account, role)
    }
}

/// In-memory authority table for offline verification.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthorityStore {
    authorities: HashMap<(AccountName, AuthorityRole), Authority>,
}

impl MemoryAuthorityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, account: AccountName, role: AuthorityRole, authority: Authority) {
        self.authorities.insert((account, role), authority);
    }

    pub fn insert_account(&mut self, account: AccountName, owner: Authority, active: Authority, posting: Authority) {
        self.insert(account.clone(), AuthorityRole::Owner, owner);
        self.insert(account.clone(), AuthorityRole::Active, active);
        self.insert(account, AuthorityRole::Posting, posting);
    }

    pub fn remove(&mut self, account: &AccountName, role: AuthorityRole) -> Option<Authority> {
        self.authorities.remove(&(account.clone(), role))
    }
}

impl AuthorityLookup for MemoryAuthorityStore {
    fn lookup(&self, account: &AccountName, role: AuthorityRole) -> Result<Authority, SteemError> {
        self.authorities
            .get(&(account.clone(), role))
            .cloned()
            .ok_or_else(|| SteemError::AuthorityLookupFailed {
                account: account.to_string(),
                role: role.to_string(),
                reason: "unknown account".into(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AccountCacheStatus {
    BeingEvaluated,
    AccountSatisfied,
}

/// Weighted-threshold evaluation over one set of provided keys.
///
/// Account entries nested in an authority resolve through `nested_role` of
/// the named account. Nesting stops at `max_depth`; an account already on
/// the evaluation path contributes nothing.
pub struct AuthorityChecker<'a> {
    lookup: &'a dyn AuthorityLookup,
    provided_keys: &'a HashSet<PublicKey>,
    used_keys: HashSet<PublicKey>,
    nested_role: AuthorityRole,
    max_depth: u16,
    max_lookups: usize,
    fetched: HashMap<(AccountName, AuthorityRole), Authority>,
    cached_accounts: HashMap<AccountName, AccountCacheStatus>,
}

impl<'a> AuthorityChecker<'a> {
    pub fn new(
        lookup: &'a dyn AuthorityLookup,
        provided_keys: &'a HashSet<PublicKey>,
        nested_role: AuthorityRole,
        max_depth: u16,
        max_lookups: usize,
    ) -> Self {
        Self {
            lookup,
            provided_keys,
            used_keys: HashSet::new(),
            nested_role,
            max_depth,
            max_lookups,
            fetched: HashMap::new(),
            cached_accounts: HashMap::new(),
        }
    }

    pub fn all_keys_used(&self) -> bool {
        self.provided_keys.len() == self.used_keys.len()
    }

    /// Provided keys that contributed to no satisfied check so far.
    pub fn unused_keys(&self) -> Vec<&PublicKey> {
        let mut unused: Vec<&PublicKey> = self
            .provided_keys
            .iter()
            .filter(|k| !self.used_keys.contains(*k))
            .collect();
        unused.sort();
        unused
    }

    pub fn lookup_count(&self) -> usize {
        self.fetched.len()
    }

    /// Whether `account` is approved through its nesting-role authority.
    pub fn account_satisfied(&mut self, account: &AccountName) -> Result<bool, SteemError> {
        if self.cached_accounts.get(account) == Some(&AccountCacheStatus::AccountSatisfied) {
            return Ok(true);
        }
        let authority = self.fetch(account, self.nested_role)?;
        self.evaluate_account(account, &authority, 0)
    }

    /// Whether the given role authority of `account` is satisfied.
    pub fn role_satisfied(&mut self, account: &AccountName, role: AuthorityRole) -> Result<bool, SteemError> {
        if role == self.nested_role {
            return self.account_satisfied(account);
        }
        let authority = self.fetch(account, role)?;
        self.satisfied(&authority, 0)
    }

    pub fn satisfied(&mut self, authority: &Authority, depth: u16) -> Result<bool, SteemError> {
        let threshold = authority.weight_threshold as u64;
        let mut total_weight = 0u64;
        // A repeated entry counts once, at its first weight.
        let mut counted_keys = HashSet::new();
        let mut counted_accounts = HashSet::new();

        for (key, weight) in &authority.key_auths {
            if self.provided_keys.contains(key) && counted_keys.insert(key) {
                self.used_keys.insert(key.clone());
                total_weight += *weight as u64;
                if total_weight >= threshold {
                    return Ok(true);
                }
            }
        }

        for (account, weight) in &authority.account_auths {
            if !counted_accounts.insert(account) {
                continue;
            }
            if self.visit_account_weight(account, depth)? {
                total_weight += *weight as u64;
                if total_weight >= threshold {
                    return Ok(true);
                }
            }
        }

        Ok(total_weight >= threshold)
    }

    fn visit_account_weight(&mut self, account: &AccountName, depth: u16) -> Result<bool, SteemError> {
        match self.cached_accounts.get(account) {
            Some(AccountCacheStatus::AccountSatisfied) => return Ok(true),
            Some(AccountCacheStatus::BeingEvaluated) => {
                debug!("authority cycle through {}, ignoring entry", account);
                return Ok(false);
            }
            None => {}
        }

        if depth >= self.max_depth {
            debug!("authority depth limit {} reached at {}", self.max_depth, account);
            return Ok(false);
        }

        let authority = self.fetch(account, self.nested_role)?;
        self.evaluate_account(account, &authority, depth + 1)
    }

    fn evaluate_account(
        &mut self,
        account: &AccountName,
        authority: &Authority,
        depth: u16,
    ) -> Result<bool, SteemError> {
        self.cached_accounts
            .insert(account.clone(), AccountCacheStatus::BeingEvaluated);
        let result = self.satisfied(authority, depth);
        match result {
            Ok(true) => {
                self.cached_accounts
                    .insert(account.clone(), AccountCacheStatus::AccountSatisfied);
            }
            _ => {
                // Unsatisfied results are not cached; a shallower visit may
                // still reach keys the depth limit cut off here.
                self.cached_accounts.remove(account);
            }
        }
        result
    }

    fn fetch(&mut self, account: &AccountName, role: AuthorityRole) -> Result<Authority, SteemError> {
        let key = (account.clone(), role);
        if let Some(authority) = self.fetched.get(&key) {
            return Ok(authority.clone());
        }
        if self.fetched.len() >= self.max_lookups {
            return Err(SteemError::RecursionLimitExceeded(format!(
                "more than {} authority lookups",
                self.max_lookups
            )));
        }

        trace!("looking up {} authority of {}", role, account);
        let authority = self.lookup.lookup(account, role).map_err(|e| {
            warn!("authority lookup for {} {} failed: {}", account, role, e);
            match e {
                SteemError::AuthorityLookupFailed { .. } => e,
                other => SteemError::AuthorityLookupFailed {
                    account: account.to_string(),
                    role: role.to_string(),
                    reason: other.to_string(),
                },
            }
        })?;
        self.fetched.insert(key, authority.clone());
        Ok(authority)
    }
}

/// Check that `provided_keys` satisfy every requirement and that each key
/// was needed by at least one of them.
pub fn verify_authority(
    required: &RequiredAuthorities,
    provided_keys: &HashSet<PublicKey>,
    lookup: &dyn AuthorityLookup,
    config: &ChainConfig,
) -> Result<(), SteemError> {
    if !required.posting.is_empty() {
        if required.mixes_posting() {
            return Err(SteemError::InvalidOperation(
                "posting authority cannot be mixed with active, owner or other authorities".into(),
            ));
        }

        let mut checker = AuthorityChecker::new(
            lookup,
            provided_keys,
            AuthorityRole::Posting,
            config.max_sig_check_depth,
            config.max_authority_lookups,
        );
        for account in &required.posting {
            let satisfied = checker.account_satisfied(account)?
                || checker.role_satisfied(account, AuthorityRole::Active)?
                || checker.role_satisfied(account, AuthorityRole::Owner)?;
            if !satisfied {
                return Err(SteemError::AuthorityUnsatisfied {
                    account: account.to_string(),
                    role: AuthorityRole::Posting.to_string(),
                });
            }
        }
        return check_unused(&checker);
    }

    let mut checker = AuthorityChecker::new(
        lookup,
        provided_keys,
        AuthorityRole::Active,
        config.max_sig_check_depth,
        config.max_authority_lookups,
    );

    for (index, authority) in required.other.iter().enumerate() {
        if !checker.satisfied(authority, 0)? {
            return Err(SteemError::OtherAuthorityUnsatisfied(index));
        }
    }

    for account in &required.active {
        let satisfied = checker.account_satisfied(account)?
            || checker.role_satisfied(account, AuthorityRole::Owner)?;
        if !satisfied {
            return Err(SteemError::AuthorityUnsatisfied {
                account: account.to_string(),
                role: AuthorityRole::Active.to_string(),
            });
        }
    }

    for account in &required.owner {
        if !checker.role_satisfied(account, AuthorityRole::Owner)? {
            return Err(SteemError::AuthorityUnsatisfied {
                account: account.to_string(),
                role: AuthorityRole::Owner.to_string(),
            });
        }
    }

    check_unused(&checker)
}

fn check_unused(checker: &AuthorityChecker<'_>) -> Result<(), SteemError> {
    match checker.unused_keys().first() {
        Some(key) => Err(SteemError::IrrelevantSignature(key.to_string())),
        None => Ok(()),
    }
}
