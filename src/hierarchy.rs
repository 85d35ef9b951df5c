//! Foreign-key hierarchy used by the tree layout.
//!
//! Each relationship is a directed child -> parent edge: the source table
//! holds the foreign key, the target table holds the referenced key.

use crate::model::{Relationship, TableKey};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Hierarchy {
    /// Level per visible table; roots are level 0.
    pub levels: HashMap<TableKey, u32>,
    /// Parent table per child (foreign-key direction).
    pub parents: HashMap<TableKey, TableKey>,
    /// Children per parent, in relationship encounter order.
    pub children: HashMap<TableKey, Vec<TableKey>>,
    /// Tables with no parent, plus any table unreachable from one.
    pub roots: Vec<TableKey>,
}

impl Hierarchy {
    pub fn level(&self, key: &TableKey) -> u32 {
        self.levels.get(key).copied().unwrap_or(0)
    }

    pub fn max_level(&self) -> u32 {
        self.levels.values().copied().max().unwrap_or(0)
    }
}

/// Assign a level to every visible table by BFS from all roots at once.
/// First discovery wins, so cycles terminate; tables left unvisited
/// (cycle members with no entry point, or isolated tables) are forced to
/// level 0 and treated as roots.
pub fn build(visible: &[TableKey], relationships: &[Relationship]) -> Hierarchy {
    let key_set: HashSet<&TableKey> = visible.iter().collect();

    let mut parents: HashMap<TableKey, TableKey> = HashMap::new();
    let mut children: HashMap<TableKey, Vec<TableKey>> = HashMap::new();

    for rel in relationships {
        let child = rel.source_key();
        let parent = rel.target_key();
        if !key_set.contains(&child) || !key_set.contains(&parent) {
            continue;
        }
        let siblings = children.entry(parent.clone()).or_default();
        if !siblings.contains(&child) {
            siblings.push(child.clone());
        }
        parents.insert(child, parent);
    }

    let mut roots: Vec<TableKey> = visible
        .iter()
        .filter(|k| !parents.contains_key(k))
        .cloned()
        .collect();

    let mut levels: HashMap<TableKey, u32> = HashMap::new();
    let mut visited: HashSet<TableKey> = HashSet::new();
    let mut queue: VecDeque<(TableKey, u32)> =
        roots.iter().map(|k| (k.clone(), 0)).collect();

    while let Some((key, level)) = queue.pop_front() {
        if !visited.insert(key.clone()) {
            continue;
        }
        levels.insert(key.clone(), level);
        if let Some(kids) = children.get(&key) {
            for child in kids {
                if !visited.contains(child) {
                    queue.push_back((child.clone(), level + 1));
                }
            }
        }
    }

    // Cycle members without an entry point never get visited; park them
    // at the root level so every table has a position in the tree.
    for key in visible {
        if !visited.contains(key) {
            levels.insert(key.clone(), 0);
            roots.push(key.clone());
        }
    }

    Hierarchy {
        levels,
        parents,
        children,
        roots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(name: &str, source: (&str, &str), target: (&str, &str)) -> Relationship {
        Relationship {
            name: name.to_string(),
            source_schema: source.0.to_string(),
            source_table: source.1.to_string(),
            source_column: "fk".to_string(),
            target_schema: target.0.to_string(),
            target_table: target.1.to_string(),
            target_column: "id".to_string(),
        }
    }

    fn keys(names: &[&str]) -> Vec<TableKey> {
        names.iter().map(|n| TableKey::new("app", n)).collect()
    }

    #[test]
    fn test_chain_levels() {
        let visible = keys(&["grandchild", "child", "root"]);
        let rels = vec![
            rel("r1", ("app", "child"), ("app", "root")),
            rel("r2", ("app", "grandchild"), ("app", "child")),
        ];
        let h = build(&visible, &rels);

        assert_eq!(h.level(&TableKey::new("app", "root")), 0);
        assert_eq!(h.level(&TableKey::new("app", "child")), 1);
        assert_eq!(h.level(&TableKey::new("app", "grandchild")), 2);
        assert_eq!(h.roots, keys(&["root"]));
    }

    #[test]
    fn test_every_visible_table_gets_a_level() {
        let visible = keys(&["a", "b", "isolated"]);
        let rels = vec![rel("r1", ("app", "a"), ("app", "b"))];
        let h = build(&visible, &rels);

        for key in &visible {
            assert!(h.levels.contains_key(key), "missing level for {key}");
        }
        assert_eq!(h.level(&TableKey::new("app", "isolated")), 0);
    }

    #[test]
    fn test_mutual_cycle_terminates_at_level_zero() {
        let visible = keys(&["a", "b"]);
        let rels = vec![
            rel("r1", ("app", "a"), ("app", "b")),
            rel("r2", ("app", "b"), ("app", "a")),
        ];
        let h = build(&visible, &rels);

        // Both members of the cycle are parked at the root level.
        assert_eq!(h.level(&TableKey::new("app", "a")), 0);
        assert_eq!(h.level(&TableKey::new("app", "b")), 0);
        assert_eq!(h.roots.len(), 2);
    }

    #[test]
    fn test_diamond_first_discovery_wins() {
        // d is reachable via b (level 2) and via c (level 2); either way a
        // single level is assigned exactly once.
        let visible = keys(&["a", "b", "c", "d"]);
        let rels = vec![
            rel("r1", ("app", "b"), ("app", "a")),
            rel("r2", ("app", "c"), ("app", "a")),
            rel("r3", ("app", "d"), ("app", "b")),
            rel("r4", ("app", "d"), ("app", "c")),
        ];
        let h = build(&visible, &rels);

        assert_eq!(h.level(&TableKey::new("app", "d")), 2);
        assert_eq!(h.max_level(), 2);
    }

    #[test]
    fn test_hidden_endpoint_relationships_are_ignored() {
        let visible = keys(&["a"]);
        let rels = vec![rel("r1", ("app", "a"), ("app", "hidden"))];
        let h = build(&visible, &rels);

        assert_eq!(h.level(&TableKey::new("app", "a")), 0);
        assert!(h.parents.is_empty());
    }
}
