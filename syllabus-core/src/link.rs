//! Edge pass: attach prerequisite codes to the disciplines that own them.

use crate::graph::CatalogGraph;
use syllabus_scanner::IndexPage;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Annotations appended to some discipline's dependencies.
    pub attached: usize,
    /// Attached codes that do not name any discipline in the graph.
    pub unresolved: usize,
    /// Annotations with no owning discipline in the graph.
    pub orphaned: usize,
    /// Annotations with no code text.
    pub blank: usize,
}

/// Append every annotation on `index` to the dependency list of the
/// discipline link nearest before it.
///
/// Must run after every record is in `graph`. Ownership is looked up with a
/// binary search over link positions, so the pass is O(m log n) for m
/// annotations and n links.
pub fn link_dependencies(index: &IndexPage, graph: &mut CatalogGraph) -> LinkStats {
    let mut stats = LinkStats::default();

    for annotation in &index.annotations {
        if annotation.code.is_empty() {
            warn!(
                "Dependency annotation at position {} has no code; skipped",
                annotation.position
            );
            stats.blank += 1;
            continue;
        }

        let Some(owner) = index.owner_of(annotation.position) else {
            warn!(
                "Dependency {} at position {} has no preceding discipline; skipped",
                annotation.code, annotation.position
            );
            stats.orphaned += 1;
            continue;
        };

        if !graph.add_dependency(&owner.code, &annotation.code) {
            warn!(
                "Dependency {} belongs to {}, which is not in the catalog; skipped",
                annotation.code, owner.code
            );
            stats.orphaned += 1;
            continue;
        }

        debug!("{} depends on {}", owner.code, annotation.code);
        stats.attached += 1;
        if !graph.contains(&annotation.code) {
            stats.unresolved += 1;
        }
    }

    stats
}
