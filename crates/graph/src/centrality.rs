use crate::types::{DependencyGraph, EdgeKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

const PAGERANK_DAMPING: f64 = 0.85;
const PAGERANK_ITERATIONS: usize = 50;

/// Importance measures for one node of the call subgraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityMetrics {
    pub betweenness: f64,
    pub pagerank: f64,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// Compute importance rankings over the call-only subgraph.
///
/// Nodes that participate in no call edge are absent from the result; an
/// empty call subgraph yields an empty mapping rather than an error.
#[must_use]
pub fn compute_centrality(graph: &DependencyGraph) -> HashMap<String, CentralityMetrics> {
    let call_graph = CallAdjacency::from_graph(graph);
    if call_graph.node_ids.is_empty() {
        return HashMap::new();
    }

    let betweenness = call_graph.betweenness();
    let pagerank = call_graph.pagerank();

    call_graph
        .node_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            (
                id.clone(),
                CentralityMetrics {
                    betweenness: betweenness[i],
                    pagerank: pagerank[i],
                    in_degree: call_graph.in_degree[i],
                    out_degree: call_graph.out[i].len(),
                },
            )
        })
        .collect()
}

/// Compact adjacency over the call subgraph, node ids sorted for
/// deterministic iteration
struct CallAdjacency {
    node_ids: Vec<String>,
    out: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl CallAdjacency {
    fn from_graph(graph: &DependencyGraph) -> Self {
        let mut pairs: Vec<(String, String)> = graph
            .edges()
            .filter(|(_, edge, _)| edge.kind == EdgeKind::Call)
            .map(|(source, _, target)| (source.to_string(), target.to_string()))
            .collect();
        pairs.sort();

        let mut node_ids: Vec<String> = pairs
            .iter()
            .flat_map(|(s, t)| [s.clone(), t.clone()])
            .collect();
        node_ids.sort();
        node_ids.dedup();

        let index: HashMap<&str, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut out = vec![Vec::new(); node_ids.len()];
        let mut in_degree = vec![0usize; node_ids.len()];
        for (source, target) in &pairs {
            let s = index[source.as_str()];
            let t = index[target.as_str()];
            out[s].push(t);
            in_degree[t] += 1;
        }

        Self {
            node_ids,
            out,
            in_degree,
        }
    }

    /// Brandes' single-source accumulation over unweighted shortest paths
    fn betweenness(&self) -> Vec<f64> {
        let n = self.node_ids.len();
        let mut centrality = vec![0.0_f64; n];

        for s in 0..n {
            let mut stack = Vec::with_capacity(n);
            let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut sigma = vec![0.0_f64; n];
            let mut dist = vec![-1_i64; n];

            sigma[s] = 1.0;
            dist[s] = 0;

            let mut queue = VecDeque::new();
            queue.push_back(s);
            while let Some(v) = queue.pop_front() {
                stack.push(v);
                for &w in &self.out[v] {
                    if dist[w] < 0 {
                        dist[w] = dist[v] + 1;
                        queue.push_back(w);
                    }
                    if dist[w] == dist[v] + 1 {
                        sigma[w] += sigma[v];
                        preds[w].push(v);
                    }
                }
            }

            let mut delta = vec![0.0_f64; n];
            while let Some(w) = stack.pop() {
                for &v in &preds[w] {
                    delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
                }
                if w != s {
                    centrality[w] += delta[w];
                }
            }
        }

        centrality
    }

    /// Power iteration with teleportation; dangling mass is redistributed
    /// uniformly
    fn pagerank(&self) -> Vec<f64> {
        let n = self.node_ids.len();
        let mut scores = vec![1.0 / n as f64; n];
        let base = (1.0 - PAGERANK_DAMPING) / n as f64;

        for _ in 0..PAGERANK_ITERATIONS {
            let dangling_mass: f64 = (0..n)
                .filter(|&v| self.out[v].is_empty())
                .map(|v| scores[v])
                .sum();

            let mut next = vec![base + PAGERANK_DAMPING * dangling_mass / n as f64; n];
            for v in 0..n {
                if self.out[v].is_empty() {
                    continue;
                }
                let share = PAGERANK_DAMPING * scores[v] / self.out[v].len() as f64;
                for &w in &self.out[v] {
                    next[w] += share;
                }
            }

            scores = next;
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GraphEdge, GraphNode, NodePayload};
    use pretty_assertions::assert_eq;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            payload: NodePayload::File {
                path: id.to_string(),
                name: id.to_string(),
            },
        }
    }

    fn call_graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (source, target) in edges {
            graph.ensure_node(node(source));
            graph.ensure_node(node(target));
            graph.upsert_edge(source, target, GraphEdge::new(EdgeKind::Call, 0.8));
        }
        graph
    }

    #[test]
    fn empty_call_subgraph_yields_empty_mapping() {
        let graph = DependencyGraph::new();
        assert!(compute_centrality(&graph).is_empty());
    }

    #[test]
    fn degrees_count_call_edges_only() {
        let mut graph = call_graph(&[("a", "hub"), ("b", "hub")]);
        // A non-call edge must not affect metrics.
        graph.ensure_node(node("c"));
        graph.upsert_edge("c", "hub", GraphEdge::new(EdgeKind::Import, 0.9));

        let metrics = compute_centrality(&graph);
        let hub = &metrics["hub"];

        assert_eq!(hub.in_degree, 2);
        assert_eq!(hub.out_degree, 0);
        assert!(!metrics.contains_key("c"));
    }

    #[test]
    fn nodes_without_call_edges_are_absent() {
        let mut graph = call_graph(&[("a", "b")]);
        graph.ensure_node(node("isolated"));

        let metrics = compute_centrality(&graph);
        assert_eq!(metrics.len(), 2);
        assert!(!metrics.contains_key("isolated"));
    }

    #[test]
    fn middle_of_chain_has_highest_betweenness() {
        let graph = call_graph(&[("a", "mid"), ("mid", "z")]);
        let metrics = compute_centrality(&graph);

        assert!(metrics["mid"].betweenness > metrics["a"].betweenness);
        assert!(metrics["mid"].betweenness > metrics["z"].betweenness);
    }

    #[test]
    fn heavily_called_node_ranks_higher_in_pagerank() {
        let graph = call_graph(&[("a", "popular"), ("b", "popular"), ("c", "popular"), ("a", "other")]);
        let metrics = compute_centrality(&graph);

        assert!(metrics["popular"].pagerank > metrics["other"].pagerank);
        assert!(metrics["popular"].pagerank > metrics["a"].pagerank);
    }

    #[test]
    fn pagerank_scores_sum_to_one() {
        let graph = call_graph(&[("a", "b"), ("b", "c"), ("c", "a"), ("d", "a")]);
        let metrics = compute_centrality(&graph);

        let total: f64 = metrics.values().map(|m| m.pagerank).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
