use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use syllabus_scanner::DisciplineRecord;

/// Discipline code to record, kept in insertion order.
///
/// Built in two passes over one index page: records first, with empty
/// dependency lists, then dependency codes appended by
/// [`crate::link::link_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogGraph {
    records: Vec<DisciplineRecord>,
    positions: HashMap<String, usize>,
}

impl CatalogGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its code. A record with an existing code
    /// replaces the old one in place; it keeps the original position.
    pub fn insert(&mut self, record: DisciplineRecord) {
        match self.positions.get(&record.code) {
            Some(&position) => self.records[position] = record,
            None => {
                self.positions.insert(record.code.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&DisciplineRecord> {
        self.positions.get(code).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut DisciplineRecord> {
        self.positions.get(code).map(|&i| &mut self.records[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    /// Append `dependency` to `owner`'s list. Returns false when `owner` is
    /// not in the graph. `dependency` itself is not checked.
    pub fn add_dependency(&mut self, owner: &str, dependency: &str) -> bool {
        match self.get_mut(owner) {
            Some(record) => {
                record.dependencies.push(dependency.to_string());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisciplineRecord> {
        self.records.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.code.as_str())
    }

    pub fn edge_count(&self) -> usize {
        self.records.iter().map(|r| r.dependencies.len()).sum()
    }
}

impl FromIterator<DisciplineRecord> for CatalogGraph {
    fn from_iter<I: IntoIterator<Item = DisciplineRecord>>(iter: I) -> Self {
        let mut graph = CatalogGraph::new();
        for record in iter {
            graph.insert(record);
        }
        graph
    }
}

impl Serialize for CatalogGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.code, record)?;
        }
        map.end()
    }
}
