//! DOT serialization of a [`GraphContext`]

use super::model::{GraphContext, GraphEdge, GraphNode};
use crate::tree::{ImmutableTree, PathToLeaf};
use crate::Result;
use std::fmt;
use std::io::Write;
use tracing::debug;

impl fmt::Display for GraphEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" -- \"{}\";", self.from, self.to)
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [label=<{}>", self.id, self.label)?;
        for (key, value) in &self.attrs {
            write!(f, ", {key}={value}")?;
        }
        write!(f, "];")
    }
}

/// The fixed graph template: edges first, then nodes, in collection order
impl fmt::Display for GraphContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "strict graph {{")?;
        for edge in &self.edges {
            writeln!(f, "    {edge}")?;
        }
        writeln!(f)?;
        for node in &self.nodes {
            writeln!(f, "    {node}")?;
        }
        writeln!(f)?;
        writeln!(f, "}}")
    }
}

impl GraphContext {
    /// Write the whole graph to `w` in a single write
    ///
    /// A rejected write aborts the render; nothing is retried.
    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        let text = self.to_string();
        w.write_all(text.as_bytes())?;
        w.flush()?;
        debug!(bytes = text.len(), "Rendered DOT graph");
        Ok(())
    }
}

/// Render `tree` as a DOT graph, highlighting every node referenced by `paths`
///
/// Hashes are ensured first, then the tree is walked in pre-order and the
/// collected graph is written to `w`.
pub fn write_dot_graph<W: Write + ?Sized>(
    w: &mut W,
    tree: &ImmutableTree,
    paths: &[PathToLeaf],
) -> Result<()> {
    tree.ensure_hashes()?;
    GraphContext::build(tree, paths).render(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io;

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_graph_text() {
        let mut out = Vec::new();
        write_dot_graph(&mut out, &ImmutableTree::new(1), &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "strict graph {\n\n\n}\n");
    }

    #[test]
    fn test_line_syntax() {
        let ctx = GraphContext {
            edges: vec![GraphEdge {
                from: "aa".into(),
                to: "bb".into(),
            }],
            nodes: vec![GraphNode {
                id: "aa".into(),
                label: "<b>x</b>".into(),
                attrs: BTreeMap::from([
                    ("style".to_string(), "filled".to_string()),
                    ("shape".to_string(), "circle".to_string()),
                ]),
            }],
        };
        assert_eq!(
            ctx.to_string(),
            "strict graph {\n    \"aa\" -- \"bb\";\n\n    \"aa\" [label=<<b>x</b>>, shape=circle, style=filled];\n\n}\n"
        );
    }

    #[test]
    fn test_sink_failure_is_returned() {
        let tree = ImmutableTree::from_sorted(1, [("a", "1")]).unwrap();
        let err = write_dot_graph(&mut BrokenSink, &tree, &[]).unwrap_err();
        assert!(matches!(err, crate::Error::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_render_is_deterministic() {
        let tree = ImmutableTree::from_sorted(1, [("a", "1"), ("b", "2"), ("c", "3")]).unwrap();
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_dot_graph(&mut first, &tree, &[]).unwrap();
        write_dot_graph(&mut second, &tree, &[]).unwrap();
        assert_eq!(first, second);
    }
}
