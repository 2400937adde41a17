use crate::graph::CatalogGraph;
use colored::Colorize;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Shape of a finished catalog graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub disciplines: usize,
    pub edges: usize,
    /// Disciplines with no prerequisites at all.
    pub entry_points: usize,
    /// `(owner, code)` pairs whose code names no discipline in the graph.
    pub unresolved: Vec<(String, String)>,
    /// Whether resolved prerequisites form a DAG.
    pub acyclic: bool,
    /// Disciplines on the longest resolved prerequisite chain; `None` when
    /// the graph has a cycle.
    pub longest_chain: Option<usize>,
}

pub fn summarize(graph: &CatalogGraph) -> CatalogSummary {
    let mut dag: DiGraph<&str, ()> = DiGraph::new();
    let nodes: HashMap<&str, NodeIndex> = graph.codes().map(|code| (code, dag.add_node(code))).collect();

    let mut unresolved = Vec::new();
    for record in graph.iter() {
        let owner = nodes[record.code.as_str()];
        for dependency in &record.dependencies {
            match nodes.get(dependency.as_str()) {
                Some(&prerequisite) => {
                    dag.update_edge(prerequisite, owner, ());
                }
                None => unresolved.push((record.code.clone(), dependency.clone())),
            }
        }
    }

    let longest_chain = toposort(&dag, None).ok().map(|order| {
        let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
        for node in order {
            let level = dag
                .neighbors_directed(node, petgraph::Direction::Incoming)
                .filter_map(|prerequisite| depth.get(&prerequisite))
                .max()
                .map_or(1, |d| d + 1);
            depth.insert(node, level);
        }
        depth.values().copied().max().unwrap_or(0)
    });

    CatalogSummary {
        disciplines: graph.len(),
        edges: graph.edge_count(),
        entry_points: graph.iter().filter(|r| r.dependencies.is_empty()).count(),
        unresolved,
        acyclic: longest_chain.is_some(),
        longest_chain,
    }
}

/// Colored, human-readable rendering of a summary.
pub fn generate_summary_report(summary: &CatalogSummary) -> String {
    let mut report = String::new();
    report.push_str(&format!("{}\n\n", "━".repeat(52)));
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Disciplines: {}\n", summary.disciplines));
    report.push_str(&format!("  Prerequisite edges: {}\n", summary.edges));
    report.push_str(&format!("  Without prerequisites: {}\n", summary.entry_points));

    match summary.longest_chain {
        Some(chain) => report.push_str(&format!("  Longest prerequisite chain: {}\n", chain)),
        None => report.push_str(&format!("  {}\n", "Prerequisite graph has a cycle".red())),
    }

    if !summary.unresolved.is_empty() {
        report.push_str(&format!(
            "\n## {} ({})\n",
            "Unresolved prerequisites".yellow(),
            summary.unresolved.len()
        ));
        for (owner, code) in &summary.unresolved {
            report.push_str(&format!("  {} -> {}\n", owner, code.bright_black()));
        }
    }

    report.push_str(&format!("\n{}\n", "━".repeat(52)));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_scanner::DisciplineRecord;

    fn graph(entries: &[(&str, &[&str])]) -> CatalogGraph {
        entries
            .iter()
            .map(|(code, deps)| {
                let mut record = DisciplineRecord::new(code.to_string(), code.to_string(), String::new());
                record.dependencies = deps.iter().map(|d| d.to_string()).collect();
                record
            })
            .collect()
    }

    #[test]
    fn test_summary_of_chain_with_unresolved_code() {
        let graph = graph(&[
            ("SCC0201", &[]),
            ("SCC0202", &["SCC0201"]),
            ("SCC0601", &["SCC0202", "SMA0353"]),
        ]);

        let summary = summarize(&graph);

        assert_eq!(summary.disciplines, 3);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.entry_points, 1);
        assert_eq!(summary.unresolved, vec![("SCC0601".to_string(), "SMA0353".to_string())]);
        assert!(summary.acyclic);
        assert_eq!(summary.longest_chain, Some(3));
    }

    #[test]
    fn test_cycle_is_reported() {
        let graph = graph(&[("AAA0001", &["BBB0002"]), ("BBB0002", &["AAA0001"])]);

        let summary = summarize(&graph);

        assert!(!summary.acyclic);
        assert_eq!(summary.longest_chain, None);
        assert!(generate_summary_report(&summary).contains("Prerequisite graph has a cycle"));
    }

    #[test]
    fn test_report_lists_unresolved() {
        let graph = graph(&[("SCC0601", &["SMA0353"])]);
        let report = generate_summary_report(&summarize(&graph));

        assert!(report.contains("Disciplines: 1"));
        assert!(report.contains("Unresolved prerequisites"));
        assert!(report.contains("SCC0601 -> "));
        assert!(report.contains("SMA0353"));
    }

    #[test]
    fn test_empty_graph() {
        let summary = summarize(&CatalogGraph::new());
        assert_eq!(summary.disciplines, 0);
        assert_eq!(summary.longest_chain, Some(0));
    }
}
