//! Export — Graphviz DOT and JSON reports of a ranked graph.
//!
//! ```text
//! Graph + ranking → write_dot() → pagerank_graph.dot
//!   → dot -Tpng pagerank_graph.dot -o pagerank.png
//! ```
//!
//! Nothing written here is read back by the crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::model::{Graph, NodeName};
use crate::pagerank::PageRankResult;
use crate::Result;

/// File name used when the caller does not pick one.
pub const DEFAULT_DOT_FILE: &str = "pagerank_graph.dot";

/// Write `graph` as a DOT digraph, labelling each ranked node with its
/// score to six decimal places.
///
/// One `"src" -> "dst";` line is written per link (duplicates included),
/// then one label line per entry of `ranking`, in ranking order.
pub fn write_dot(graph: &Graph, ranking: &[(NodeName, f64)], writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "digraph PageRank {{")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(writer, "    node [shape=circle];")?;

    for (source, target) in graph.edges() {
        writeln!(writer, "    {} -> {};", quote(source.as_str()), quote(target.as_str()))?;
    }

    for (node, score) in ranking {
        writeln!(
            writer,
            "    {} [label=\"{}\\n{:.6}\"];",
            quote(node.as_str()),
            escape(node.as_str()),
            score
        )?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}

/// Write the DOT description to `path`, replacing any existing file.
pub fn export_dot_file(
    path: impl AsRef<Path>,
    graph: &Graph,
    ranking: &[(NodeName, f64)],
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_dot(graph, ranking, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), nodes = ranking.len(), "wrote DOT file");
    Ok(())
}

/// Pretty-printed JSON form of a result.
pub fn write_json_report(result: &PageRankResult, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}

/// DOT quoted identifier.
fn quote(id: &str) -> String {
    format!("\"{}\"", escape(id))
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
