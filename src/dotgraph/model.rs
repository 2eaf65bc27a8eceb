//! Intermediate node/edge model built from a tree traversal

use super::highlight::PathIndex;
use crate::tree::{ImmutableTree, Node, NodeId, PathToLeaf};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Attributes every node starts with
const DEFAULT_NODE_ATTRS: &[(&str, &str)] = &[("shape", "circle")];

const LEAF_FILL: &str = "lightgrey";
const HIGHLIGHT_FILL: &str = "lightblue";

const KEY_FONT: (&str, u32) = ("sans-serif", 16);
const MONO_FONT: (&str, u32) = ("monospace", 10);
const VALUE_FONT: (&str, u32) = ("sans-serif", 10);

/// An undirected connection between a parent and one of its children
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// A rendered tree node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    /// Lowercase hex of the node hash
    pub id: String,
    /// HTML-like label body
    pub label: String,
    /// Style attributes, emitted in key order
    pub attrs: BTreeMap<String, String>,
}

impl GraphNode {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Everything collected for one rendering
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphContext {
    pub edges: Vec<GraphEdge>,
    pub nodes: Vec<GraphNode>,
}

impl GraphContext {
    /// Walk the tree in pre-order and collect a node per visit and an edge
    /// per present child, left before right
    ///
    /// Node hashes are read as-is; unhashed nodes get an empty identity.
    pub fn build(tree: &ImmutableTree, paths: &[PathToLeaf]) -> Self {
        let index = PathIndex::new(paths);
        let mut ctx = GraphContext::default();

        tree.traverse(true, |node| {
            ctx.push_node(tree, node, &index);
            false
        });

        debug!(
            nodes = ctx.nodes.len(),
            edges = ctx.edges.len(),
            referenced = index.len(),
            "Built graph model"
        );
        ctx
    }

    /// Number of nodes drawn with the highlight style
    pub fn highlighted_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.attr("peripheries").is_some())
            .count()
    }

    fn push_node(&mut self, tree: &ImmutableTree, node: &Node, index: &PathIndex) {
        let id = identity(Some(node));
        let mut attrs: BTreeMap<String, String> = DEFAULT_NODE_ATTRS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let short = node.hash().map(|h| h.short()).unwrap_or_default();
        let mut label = font_run(&String::from_utf8_lossy(node.key()), KEY_FONT);
        label += &font_run(&short, MONO_FONT);
        label += &font_run(&format!("version={}", node.version()), MONO_FONT);
        if let Some(value) = node.value() {
            label += &font_run(&String::from_utf8_lossy(value), VALUE_FONT);
        }

        if node.is_leaf() {
            attrs.insert("fillcolor".into(), LEAF_FILL.into());
            attrs.insert("style".into(), "filled".into());
        }

        let highlighted = index.is_highlighted(node.hash());
        if highlighted {
            attrs.insert("peripheries".into(), "2".into());
            attrs.insert("style".into(), "filled".into());
            attrs.insert("fillcolor".into(), HIGHLIGHT_FILL.into());
        }
        trace!(node = %id, highlighted, "Visited node");

        for child in [node.left(), node.right()].into_iter().flatten() {
            self.edges.push(GraphEdge {
                from: id.clone(),
                to: child_identity(tree, child),
            });
        }
        self.nodes.push(GraphNode { id, label, attrs });
    }
}

fn identity(node: Option<&Node>) -> String {
    node.and_then(Node::hash)
        .map(|h| h.to_hex())
        .unwrap_or_default()
}

fn child_identity(tree: &ImmutableTree, child: NodeId) -> String {
    identity(tree.node(child))
}

/// One styled line of a label
fn font_run(text: &str, (face, point_size): (&str, u32)) -> String {
    format!(
        "<font face='{face}' point-size='{point_size}'>{}</font><br/>",
        escape_html(text)
    )
}

/// Escape text for use inside an HTML-like label
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
