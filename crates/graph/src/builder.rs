//! Step-graph construction: pivoted journeys → node/edge lists for rendering.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use flowpath_core::label::is_terminal;
use flowpath_journey::StepTable;

use crate::palette::{color_for, LINK_COLOR};

/// Identity of a node in the flow graph.
///
/// Interior pages are qualified by their journey position, so "Search" at
/// step 3 and "Search" at step 7 stay distinct. The two terminal outcome
/// labels are identified by label alone — every journey converges into one
/// shared node per outcome, whatever the step index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    Step(usize, String),
    Terminal(String),
}

impl NodeKey {
    fn for_label(step: usize, label: &str) -> Self {
        if is_terminal(label) {
            NodeKey::Terminal(label.to_owned())
        } else {
            NodeKey::Step(step, label.to_owned())
        }
    }

    fn label(&self) -> &str {
        match self {
            NodeKey::Step(_, label) | NodeKey::Terminal(label) => label,
        }
    }
}

/// A weighted transition between two registered nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub weight: u64,
}

/// Render-ready flow graph: `labels` and `colors` are parallel lists in node
/// registration order, edges reference node indexes. Parallel transitions
/// between the same node pair are summed into one weighted edge.
#[derive(Debug, Clone, Serialize)]
pub struct FlowGraph {
    pub labels: Vec<String>,
    pub colors: Vec<&'static str>,
    pub edges: Vec<FlowEdge>,
    pub link_color: &'static str,
}

impl FlowGraph {
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build the flow graph from a step table.
///
/// Nodes are registered in first-occurrence order; each adjacent step pair
/// contributes weight 1 to its edge. An empty table produces an empty graph.
pub fn build_flow_graph(table: &StepTable) -> FlowGraph {
    let mut nodes: IndexMap<NodeKey, usize> = IndexMap::new();
    let mut edges: IndexMap<(usize, usize), u64> = IndexMap::new();

    for row in table.rows() {
        let steps: Vec<&str> = row.steps().collect();
        for (i, pair) in steps.windows(2).enumerate() {
            let source = register(&mut nodes, NodeKey::for_label(i, pair[0]));
            let target = register(&mut nodes, NodeKey::for_label(i + 1, pair[1]));
            *edges.entry((source, target)).or_insert(0) += 1;
        }
    }

    let mut labels = Vec::with_capacity(nodes.len());
    let mut colors = Vec::with_capacity(nodes.len());
    for key in nodes.keys() {
        labels.push(key.label().to_owned());
        colors.push(color_for(key.label()));
    }

    let edges: Vec<FlowEdge> = edges
        .into_iter()
        .map(|((source, target), weight)| FlowEdge {
            source,
            target,
            weight,
        })
        .collect();

    debug!(
        journeys = table.row_count(),
        nodes = labels.len(),
        edges = edges.len(),
        "flow graph built"
    );

    FlowGraph {
        labels,
        colors,
        edges,
        link_color: LINK_COLOR,
    }
}

fn register(nodes: &mut IndexMap<NodeKey, usize>, key: NodeKey) -> usize {
    let next = nodes.len();
    *nodes.entry(key).or_insert(next)
}
