use repograph_chunker::{Chunk, ModuleSummary};
use repograph_graph::{CentralityMetrics, GraphStats};
use serde::Serialize;
use std::collections::HashMap;

/// The serializable result of one repository analysis pass
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Repository root the analysis ran over
    pub repo: String,

    pub total_files: usize,
    pub total_chunks: usize,

    /// All extracted chunks in stable `(path, start_line)` order
    pub chunks: Vec<Chunk>,

    /// Per-directory module summaries with Merkle digests
    pub modules: Vec<ModuleSummary>,

    /// Call-graph importance rankings keyed by chunk id
    pub centrality: HashMap<String, CentralityMetrics>,

    /// Node/edge counts of the assembled graph
    pub graph: GraphStats,
}

impl AnalysisReport {
    /// Chunk ids ranked by PageRank, most central first
    #[must_use]
    pub fn top_central(&self, limit: usize) -> Vec<(&str, &CentralityMetrics)> {
        let mut ranked: Vec<(&str, &CentralityMetrics)> = self
            .centrality
            .iter()
            .map(|(id, metrics)| (id.as_str(), metrics))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.pagerank
                .partial_cmp(&a.1.pagerank)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metrics(pagerank: f64) -> CentralityMetrics {
        CentralityMetrics {
            betweenness: 0.0,
            pagerank,
            in_degree: 0,
            out_degree: 0,
        }
    }

    #[test]
    fn top_central_ranks_by_pagerank() {
        let mut centrality = HashMap::new();
        centrality.insert("low".to_string(), metrics(0.1));
        centrality.insert("high".to_string(), metrics(0.7));
        centrality.insert("mid".to_string(), metrics(0.2));

        let report = AnalysisReport {
            repo: "r".to_string(),
            total_files: 0,
            total_chunks: 0,
            chunks: vec![],
            modules: vec![],
            centrality,
            graph: GraphStats { nodes: 0, edges: 0 },
        };

        let ranked = report.top_central(2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, "high");
        assert_eq!(ranked[1].0, "mid");
    }
}
