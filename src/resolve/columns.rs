//! resolve::columns
//!
//! Insertion-ordered column mappings.
//!
//! Downstream hash computation is order-sensitive, so every mapping keeps
//! first-insertion order for its keys and first-encounter order within each
//! group. Both types serialize as JSON objects in that order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered `alias -> source column` mapping.
///
/// Setting an existing alias replaces its column and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAliases {
    entries: Vec<(String, String)>,
}

impl ColumnAliases {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `alias` to `column`.
    pub fn set(&mut self, alias: String, column: &str) {
        match self.entries.iter_mut().find(|(a, _)| *a == alias) {
            Some(entry) => entry.1 = column.to_string(),
            None => self.entries.push((alias, column.to_string())),
        }
    }

    /// Column an alias maps to.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, c)| c.as_str())
    }

    /// Iterate `(alias, column)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ColumnAliases {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (alias, column) in &self.entries {
            map.serialize_entry(alias, column)?;
        }
        map.end()
    }
}

/// Ordered `group -> [columns]` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroups {
    groups: Vec<(String, Vec<String>)>,
}

impl ColumnGroups {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    fn group_mut(&mut self, group: &str) -> &mut Vec<String> {
        let index = match self.groups.iter().position(|(g, _)| g == group) {
            Some(index) => index,
            None => {
                self.groups.push((group.to_string(), Vec::new()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }

    /// Append `column` to `group`, creating the group if needed.
    pub fn append(&mut self, group: &str, column: &str) {
        self.group_mut(group).push(column.to_string());
    }

    /// Append `column` to `group` unless it is already a member.
    pub fn append_unique(&mut self, group: &str, column: &str) {
        let members = self.group_mut(group);
        if !members.iter().any(|c| c == column) {
            members.push(column.to_string());
        }
    }

    /// Members of a group.
    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, members)| members.as_slice())
    }

    /// Group names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(g, _)| g.as_str())
    }

    /// Iterate `(group, members)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(g, m)| (g.as_str(), m.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for ColumnGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (group, members) in &self.groups {
            map.serialize_entry(group, members)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_replace_keeps_position() {
        let mut aliases = ColumnAliases::new();
        aliases.set("b_id".to_string(), "first");
        aliases.set("a_id".to_string(), "x");
        aliases.set("b_id".to_string(), "second");

        let pairs: Vec<_> = aliases.iter().collect();
        assert_eq!(pairs, vec![("b_id", "second"), ("a_id", "x")]);
    }

    #[test]
    fn append_unique_dedups_within_group_only() {
        let mut groups = ColumnGroups::new();
        groups.append_unique("z_hk", "c1");
        groups.append_unique("a_hk", "c1");
        groups.append_unique("z_hk", "c1");
        groups.append_unique("z_hk", "c2");

        assert_eq!(groups.names().collect::<Vec<_>>(), vec!["z_hk", "a_hk"]);
        assert_eq!(groups.get("z_hk").unwrap(), &["c1".to_string(), "c2".to_string()]);
    }

    #[test]
    fn append_keeps_repeats() {
        let mut groups = ColumnGroups::new();
        groups.append("t", "c");
        groups.append("t", "c");
        assert_eq!(groups.get("t").unwrap().len(), 2);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut groups = ColumnGroups::new();
        groups.append("zeta", "1");
        groups.append("alpha", "2");
        let json = serde_json::to_string(&groups).unwrap();
        assert_eq!(json, r#"{"zeta":["1"],"alpha":["2"]}"#);

        let mut aliases = ColumnAliases::new();
        aliases.set("zeta_id".to_string(), "z");
        aliases.set("alpha_id".to_string(), "a");
        let json = serde_json::to_string(&aliases).unwrap();
        assert_eq!(json, r#"{"zeta_id":"z","alpha_id":"a"}"#);
    }
}
