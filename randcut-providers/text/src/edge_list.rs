//! Weighted edge lists.

use std::io::BufRead;

use randcut_core::{EdgeId, Graph, NodeId};

use crate::errors::EdgeListError;

const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeRecord {
    from: NodeId,
    to: NodeId,
    weight: f64,
}

/// Graph read from `from to [weight]` lines.
///
/// `#` starts a comment, blank lines are skipped, and a `nodes N` line fixes
/// the node count. Without the directive the node count is one past the
/// largest endpoint. Missing weights default to `1.0`.
///
/// # Examples
/// ```
/// use randcut_core::Graph;
/// use randcut_providers_text::EdgeListGraph;
///
/// let graph = EdgeListGraph::parse("demo", "nodes 4\n0 1\n1 2 0.5 # light\n")?;
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.weight(1), 0.5);
/// # Ok::<(), randcut_providers_text::EdgeListError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeListGraph {
    name: String,
    node_count: usize,
    edges: Vec<EdgeRecord>,
}

impl EdgeListGraph {
    /// Parses an edge list held in memory.
    ///
    /// # Errors
    /// Returns [`EdgeListError`] when a line is malformed, a weight is
    /// negative or not finite, an endpoint exceeds a declared node count, or
    /// the input is empty.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, EdgeListError> {
        let mut parser = Parser::default();
        for (index, line) in text.lines().enumerate() {
            parser.line(index + 1, line)?;
        }
        parser.finish(name.into())
    }

    /// Parses an edge list from a buffered reader.
    ///
    /// # Errors
    /// Returns [`EdgeListError::Io`] when reading fails, otherwise the same
    /// errors as [`Self::parse`].
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, EdgeListError> {
        let mut parser = Parser::default();
        for (index, line) in reader.lines().enumerate() {
            parser.line(index + 1, &line?)?;
        }
        parser.finish(name.into())
    }

    /// Returns the graph's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the weight parsed for `edge`.
    ///
    /// # Panics
    /// Panics when `edge` is out of range.
    #[must_use]
    pub fn weight(&self, edge: EdgeId) -> f64 {
        self.edges[edge].weight
    }
}

impl Graph for EdgeListGraph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_a(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].from
    }

    fn node_b(&self, edge: EdgeId) -> NodeId {
        self.edges[edge].to
    }
}

#[derive(Default)]
struct Parser {
    declared: Option<(usize, usize)>,
    edges: Vec<(usize, EdgeRecord)>,
}

impl Parser {
    fn line(&mut self, line: usize, raw: &str) -> Result<(), EdgeListError> {
        let content = raw.split_once('#').map_or(raw, |(before, _)| before);
        let tokens: Vec<&str> = content.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(()),
            ["nodes", count] => self.declare(line, count),
            ["nodes", ..] => Err(malformed(line, "expected `nodes N`")),
            [from, to] => self.edge(line, from, to, None),
            [from, to, weight] => self.edge(line, from, to, Some(*weight)),
            _ => Err(malformed(line, "expected `from to [weight]`")),
        }
    }

    fn declare(&mut self, line: usize, count: &str) -> Result<(), EdgeListError> {
        if let Some((first, _)) = self.declared {
            return Err(malformed(
                line,
                &format!("node count already declared on line {first}"),
            ));
        }
        let count = count
            .parse()
            .map_err(|_| malformed(line, &format!("invalid node count `{count}`")))?;
        self.declared = Some((line, count));
        Ok(())
    }

    fn edge(
        &mut self,
        line: usize,
        from: &str,
        to: &str,
        weight: Option<&str>,
    ) -> Result<(), EdgeListError> {
        let from = parse_node(line, from)?;
        let to = parse_node(line, to)?;
        let weight = match weight {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| malformed(line, &format!("invalid weight `{raw}`")))?,
            None => DEFAULT_WEIGHT,
        };
        if !weight.is_finite() || weight < 0.0 {
            return Err(EdgeListError::InvalidWeight { line, weight });
        }
        self.edges.push((line, EdgeRecord { from, to, weight }));
        Ok(())
    }

    fn finish(self, name: String) -> Result<EdgeListGraph, EdgeListError> {
        let node_count = match self.declared {
            Some((_, node_count)) => {
                for (line, record) in &self.edges {
                    let node = record.from.max(record.to);
                    if node >= node_count {
                        return Err(EdgeListError::EndpointOutOfRange {
                            line: *line,
                            node,
                            node_count,
                        });
                    }
                }
                node_count
            }
            None if self.edges.is_empty() => return Err(EdgeListError::EmptyInput),
            None => self
                .edges
                .iter()
                .map(|(_, record)| record.from.max(record.to) + 1)
                .max()
                .unwrap_or_default(),
        };
        Ok(EdgeListGraph {
            name,
            node_count,
            edges: self.edges.into_iter().map(|(_, record)| record).collect(),
        })
    }
}

fn parse_node(line: usize, raw: &str) -> Result<NodeId, EdgeListError> {
    raw.parse()
        .map_err(|_| malformed(line, &format!("invalid node id `{raw}`")))
}

fn malformed(line: usize, reason: &str) -> EdgeListError {
    EdgeListError::Malformed {
        line,
        reason: reason.to_owned(),
    }
}
