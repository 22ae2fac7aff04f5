use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a built-in scalar function, independent of how the call was
/// spelled in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionId {
    Database,
    User,
    CurrentUser,
    ConnectionId,
    FoundRows,
    LastInsertId,
    Version,
    SkiffsqlVersion,
    Benchmark,
    Charset,
    Coercibility,
    Collation,
    RowCount,
}

impl FunctionId {
    pub const ALL: [FunctionId; 13] = [
        FunctionId::Database,
        FunctionId::User,
        FunctionId::CurrentUser,
        FunctionId::ConnectionId,
        FunctionId::FoundRows,
        FunctionId::LastInsertId,
        FunctionId::Version,
        FunctionId::SkiffsqlVersion,
        FunctionId::Benchmark,
        FunctionId::Charset,
        FunctionId::Coercibility,
        FunctionId::Collation,
        FunctionId::RowCount,
    ];

    /// Canonical upper-case SQL name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FunctionId::Database => "DATABASE",
            FunctionId::User => "USER",
            FunctionId::CurrentUser => "CURRENT_USER",
            FunctionId::ConnectionId => "CONNECTION_ID",
            FunctionId::FoundRows => "FOUND_ROWS",
            FunctionId::LastInsertId => "LAST_INSERT_ID",
            FunctionId::Version => "VERSION",
            FunctionId::SkiffsqlVersion => "SKIFFSQL_VERSION",
            FunctionId::Benchmark => "BENCHMARK",
            FunctionId::Charset => "CHARSET",
            FunctionId::Coercibility => "COERCIBILITY",
            FunctionId::Collation => "COLLATION",
            FunctionId::RowCount => "ROW_COUNT",
        }
    }

    /// Alternative spellings that resolve to the same identity.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            FunctionId::Database => &["SCHEMA"],
            FunctionId::User => &["SESSION_USER", "SYSTEM_USER"],
            _ => &[],
        }
    }

    /// Case-insensitive lookup by canonical name or alias.
    pub fn from_name(name: &str) -> Option<FunctionId> {
        let upper = name.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == upper || id.aliases().contains(&upper.as_str()))
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for id in FunctionId::ALL {
            assert!(seen.insert(id.name()), "duplicate name {}", id.name());
            for alias in id.aliases() {
                assert!(seen.insert(alias), "duplicate alias {}", alias);
            }
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(FunctionId::from_name("database"), Some(FunctionId::Database));
        assert_eq!(FunctionId::from_name("Schema"), Some(FunctionId::Database));
        assert_eq!(FunctionId::from_name("session_user"), Some(FunctionId::User));
        assert_eq!(
            FunctionId::from_name("CURRENT_USER"),
            Some(FunctionId::CurrentUser)
        );
        assert_eq!(FunctionId::from_name("row_count"), Some(FunctionId::RowCount));
        assert_eq!(FunctionId::from_name("no_such_function"), None);
    }

    #[test]
    fn test_round_trip_canonical_names() {
        for id in FunctionId::ALL {
            assert_eq!(FunctionId::from_name(id.name()), Some(id));
        }
    }
}
