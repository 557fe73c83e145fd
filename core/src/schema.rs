//! Field schemas for the tabular Manager commands.
//!
//! Every tabular command differs only in the names of its colon-separated
//! columns, so the schema is a static table keyed by command name.

use serde::Serialize;

/// A Manager command whose response body carries one record per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    List,
    Roles,
    Resources,
    ServerInfo,
}

const SCHEMAS: &[(&str, CommandKind)] = &[
    ("list", CommandKind::List),
    ("roles", CommandKind::Roles),
    ("resources", CommandKind::Resources),
    ("serverinfo", CommandKind::ServerInfo),
];

impl CommandKind {
    /// Exact, case-sensitive lookup. Unknown commands have no schema.
    pub fn from_name(name: &str) -> Option<Self> {
        SCHEMAS
            .iter()
            .find(|(command, _)| *command == name)
            .map(|(_, kind)| *kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::List => "list",
            CommandKind::Roles => "roles",
            CommandKind::Resources => "resources",
            CommandKind::ServerInfo => "serverinfo",
        }
    }

    /// Ordered field names; position `i` names column `i` of a data line.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            CommandKind::List => &["path", "status", "sessions", "name"],
            CommandKind::Roles => &["name", "description"],
            CommandKind::Resources => &["name", "type"],
            CommandKind::ServerInfo => &["property", "value"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_commands_resolve() {
        assert_eq!(CommandKind::from_name("list"), Some(CommandKind::List));
        assert_eq!(CommandKind::from_name("roles"), Some(CommandKind::Roles));
        assert_eq!(
            CommandKind::from_name("resources"),
            Some(CommandKind::Resources)
        );
        assert_eq!(
            CommandKind::from_name("serverinfo"),
            Some(CommandKind::ServerInfo)
        );
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(CommandKind::from_name("LIST"), None);
        assert_eq!(CommandKind::from_name("list "), None);
        assert_eq!(CommandKind::from_name("start"), None);
        assert_eq!(CommandKind::from_name(""), None);
    }

    #[test]
    fn names_round_trip_through_table() {
        for (name, kind) in SCHEMAS {
            assert_eq!(kind.name(), *name);
        }
    }

    #[test]
    fn list_schema_order() {
        assert_eq!(
            CommandKind::List.fields(),
            &["path", "status", "sessions", "name"]
        );
    }
}
