//! Ordered index of migrations by version and direction

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use crate::migration::{Direction, Migration};

#[derive(Debug, Clone, Default)]
struct VersionSlot {
    up: Option<Migration>,
    down: Option<Migration>,
}

impl VersionSlot {
    fn get(&self, direction: Direction) -> Option<&Migration> {
        match direction {
            Direction::Up => self.up.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<Migration> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }
}

/// Migrations keyed by version.
///
/// Versions are kept in ascending order regardless of insertion order. A
/// version is present when it has an up migration, a down migration, or
/// both.
#[derive(Debug, Clone, Default)]
pub struct Migrations {
    index: BTreeMap<u64, VersionSlot>,
}

impl Migrations {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a migration.
    ///
    /// Returns `false` and leaves the index untouched when a migration with
    /// the same version and direction is already present.
    pub fn append(&mut self, migration: Migration) -> bool {
        let slot = self
            .index
            .entry(migration.version)
            .or_default()
            .slot_mut(migration.direction);
        if slot.is_some() {
            return false;
        }
        *slot = Some(migration);
        true
    }

    /// Smallest version
    pub fn first(&self) -> Option<u64> {
        self.index.keys().next().copied()
    }

    /// Largest version strictly below `version`
    pub fn prev(&self, version: u64) -> Option<u64> {
        self.index.range(..version).next_back().map(|(v, _)| *v)
    }

    /// Smallest version strictly above `version`
    pub fn next(&self, version: u64) -> Option<u64> {
        self.index
            .range((Excluded(version), Unbounded))
            .next()
            .map(|(v, _)| *v)
    }

    /// Up migration at exactly `version`
    pub fn up(&self, version: u64) -> Option<&Migration> {
        self.get(version, Direction::Up)
    }

    /// Down migration at exactly `version`
    pub fn down(&self, version: u64) -> Option<&Migration> {
        self.get(version, Direction::Down)
    }

    pub fn get(&self, version: u64, direction: Direction) -> Option<&Migration> {
        self.index.get(&version).and_then(|slot| slot.get(direction))
    }

    pub fn contains(&self, version: u64) -> bool {
        self.index.contains_key(&version)
    }

    /// Ascending versions
    pub fn versions(&self) -> impl Iterator<Item = u64> + '_ {
        self.index.keys().copied()
    }

    /// Number of distinct versions
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::parse;

    fn index_of(names: &[&str]) -> Migrations {
        let mut migrations = Migrations::new();
        for name in names {
            assert!(migrations.append(parse(name).unwrap()), "{} rejected", name);
        }
        migrations
    }

    #[test]
    fn test_empty_index_finds_nothing() {
        let migrations = Migrations::new();
        assert!(migrations.is_empty());
        assert_eq!(migrations.first(), None);
        assert_eq!(migrations.prev(1), None);
        assert_eq!(migrations.next(0), None);
        assert!(migrations.up(1).is_none());
        assert!(migrations.down(1).is_none());
    }

    #[test]
    fn test_append_rejects_same_version_and_direction() {
        let mut migrations = index_of(&["1_init.up.sql"]);

        assert!(!migrations.append(parse("1_other.up.sql").unwrap()));
        assert_eq!(migrations.up(1).unwrap().identifier, "init");

        assert!(migrations.append(parse("1_init.down.sql").unwrap()));
        assert_eq!(migrations.len(), 1);
    }

    #[test]
    fn test_order_does_not_depend_on_insertion() {
        let migrations = index_of(&[
            "10_j.up.sql",
            "2_b.down.sql",
            "7_g.up.sql",
            "1_a.up.sql",
            "2_b.up.sql",
        ]);

        assert_eq!(migrations.versions().collect::<Vec<_>>(), vec![1, 2, 7, 10]);
        assert_eq!(migrations.first(), Some(1));
    }

    #[test]
    fn test_first_counts_either_direction() {
        let migrations = index_of(&["5_e.up.sql", "3_c.down.sql"]);
        assert_eq!(migrations.first(), Some(3));
    }

    #[test]
    fn test_prev_and_next_skip_gaps() {
        let migrations = index_of(&["1_a.up.sql", "4_d.down.sql", "9_i.up.sql"]);

        assert_eq!(migrations.next(1), Some(4));
        assert_eq!(migrations.next(4), Some(9));
        assert_eq!(migrations.next(9), None);

        assert_eq!(migrations.prev(9), Some(4));
        assert_eq!(migrations.prev(4), Some(1));
        assert_eq!(migrations.prev(1), None);
    }

    #[test]
    fn test_prev_and_next_from_absent_versions() {
        let migrations = index_of(&["1_a.up.sql", "4_d.down.sql", "9_i.up.sql"]);

        assert_eq!(migrations.next(0), Some(1));
        assert_eq!(migrations.next(5), Some(9));
        assert_eq!(migrations.prev(5), Some(4));
        assert_eq!(migrations.prev(100), Some(9));
        assert_eq!(migrations.prev(0), None);
        assert_eq!(migrations.next(u64::MAX), None);
    }

    #[test]
    fn test_direction_lookup_is_exact() {
        let migrations = index_of(&["1_a.up.sql", "1_a.down.sql", "2_b.up.sql", "3_c.down.sql"]);

        assert_eq!(migrations.up(1).unwrap().raw, "1_a.up.sql");
        assert_eq!(migrations.down(1).unwrap().raw, "1_a.down.sql");
        assert!(migrations.down(2).is_none());
        assert!(migrations.up(3).is_none());
        assert!(migrations.get(4, Direction::Up).is_none());
        assert!(migrations.contains(3));
        assert!(!migrations.contains(4));
    }

    #[test]
    fn test_walk_forward_and_back_visits_every_version_once() {
        let migrations = index_of(&[
            "3_c.up.sql",
            "1_a.up.sql",
            "1_a.down.sql",
            "8_h.down.sql",
            "5_e.up.sql",
        ]);
        let expected: Vec<u64> = migrations.versions().collect();

        let mut forward = Vec::new();
        let mut current = migrations.first();
        while let Some(version) = current {
            forward.push(version);
            current = migrations.next(version);
        }
        assert_eq!(forward, expected);

        let mut backward = Vec::new();
        let mut current = expected.last().copied();
        while let Some(version) = current {
            backward.push(version);
            current = migrations.prev(version);
        }
        backward.reverse();
        assert_eq!(backward, expected);

        for version in &expected {
            if let Some(prev) = migrations.prev(*version) {
                assert_eq!(migrations.next(prev), Some(*version));
            }
        }
    }
}
