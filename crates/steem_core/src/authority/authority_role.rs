use std::fmt;

use serde::{Deserialize, Serialize};

/// The named authorities every account carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorityRole {
    Owner,
    Active,
    Posting,
}

impl AuthorityRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityRole::Owner => "owner",
            AuthorityRole::Active => "active",
            AuthorityRole::Posting => "posting",
        }
    }
}

impl fmt::Display for AuthorityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
