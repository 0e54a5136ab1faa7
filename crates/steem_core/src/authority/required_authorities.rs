use crate::{
    authority::{Authority, AuthorityRole},
    name::AccountName,
};

/// Accounts (by role) and literal authorities an operation set must satisfy.
///
/// Each role list is de-duplicated and keeps first-insertion order so that
/// verification reports failures deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequiredAuthorities {
    pub owner: Vec<AccountName>,
    pub active: Vec<AccountName>,
    pub posting: Vec<AccountName>,
    pub other: Vec<Authority>,
}

impl RequiredAuthorities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, account: &AccountName, role: AuthorityRole) {
        let list = match role {
            AuthorityRole::Owner => &mut self.owner,
            AuthorityRole::Active => &mut self.active,
            AuthorityRole::Posting => &mut self.posting,
        };
        if !list.contains(account) {
            list.push(account.clone());
        }
    }

    pub fn add_all<'a>(&mut self, accounts: impl IntoIterator<Item = &'a AccountName>, role: AuthorityRole) {
        for account in accounts {
            self.add(account, role);
        }
    }

    pub fn add_other(&mut self, authority: Authority) {
        if !self.other.contains(&authority) {
            self.other.push(authority);
        }
    }

    pub fn extend(&mut self, other: RequiredAuthorities) {
        self.add_all(&other.owner, AuthorityRole::Owner);
        self.add_all(&other.active, AuthorityRole::Active);
        self.add_all(&other.posting, AuthorityRole::Posting);
        for authority in other.other {
            self.add_other(authority);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() && self.active.is_empty() && self.posting.is_empty() && self.other.is_empty()
    }

    /// Posting approvals cannot be combined with any other kind in one transaction.
    pub fn mixes_posting(&self) -> bool {
        !self.posting.is_empty()
            && (!self.active.is_empty() || !self.owner.is_empty() || !self.other.is_empty())
    }

    /// Every `(account, role)` pair, owner first, then active, then posting.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountName, AuthorityRole)> {
        self.owner
            .iter()
            .map(|a| (a, AuthorityRole::Owner))
            .chain(self.active.iter().map(|a| (a, AuthorityRole::Active)))
            .chain(self.posting.iter().map(|a| (a, AuthorityRole::Posting)))
    }
}
