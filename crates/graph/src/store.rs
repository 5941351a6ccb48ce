use crate::error::Result;
use crate::types::{ExportedEdge, GraphExport, GraphNode};
use serde_json::Value;

/// Connection parameters for an external persistent graph store. Absence of
/// a configured store disables synchronization only; the in-memory graph is
/// always authoritative.
#[derive(Debug, Clone)]
pub struct GraphStoreConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for GraphStoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 7687,
            username: String::new(),
            password: String::new(),
        }
    }
}

/// External graph store contract.
///
/// One node per graph node (labeled by its type), one relationship per edge
/// (typed by its kind); the store's prior contents are replaced wholesale.
/// Implementations live with whatever transport the embedding service uses.
pub trait GraphStore: Send + Sync {
    fn replace(&self, export: &GraphExport) -> Result<()>;
}

/// Renders a graph export as an ordered list of Cypher statements: clear,
/// then one `CREATE` per node, then one per edge. Non-scalar attribute
/// values are serialized to JSON text before storage. The statement list is
/// deterministic for a deterministic export.
pub struct CypherExport;

impl CypherExport {
    #[must_use]
    pub fn statements(export: &GraphExport) -> Vec<String> {
        let mut statements = Vec::with_capacity(1 + export.nodes.len() + export.edges.len());
        statements.push("MATCH (n) DETACH DELETE n;".to_string());

        for node in &export.nodes {
            statements.push(Self::node_statement(node));
        }

        for edge in &export.edges {
            statements.push(Self::edge_statement(edge));
        }

        statements
    }

    fn node_statement(node: &GraphNode) -> String {
        let label = capitalize(node.payload.type_label());

        let mut props = vec![format!("id: {}", quote(&node.id))];
        if let Ok(Value::Object(fields)) = serde_json::to_value(&node.payload) {
            for (key, value) in fields {
                if key == "type" {
                    continue;
                }
                if let Some(rendered) = render_value(&value) {
                    props.push(format!("{key}: {rendered}"));
                }
            }
        }

        format!("CREATE (n:{label} {{{}}});", props.join(", "))
    }

    fn edge_statement(edge: &ExportedEdge) -> String {
        let rel_type = edge.kind.as_str().to_uppercase();

        let mut props = vec![format!("confidence: {}", edge.confidence)];
        if let Some(detail) = &edge.detail {
            props.push(format!("detail: {}", quote(detail)));
        }

        format!(
            "MATCH (a {{id: {}}}), (b {{id: {}}}) CREATE (a)-[:{rel_type} {{{}}}]->(b);",
            quote(&edge.source),
            quote(&edge.target),
            props.join(", ")
        )
    }
}

/// Scalars pass through; anything else becomes JSON text
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(quote(s)),
        other => Some(quote(&other.to_string())),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
