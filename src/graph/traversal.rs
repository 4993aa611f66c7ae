//! Descendant walks over the DAG.
//!
//! One iterative depth-first walk serves every toggle; the `Descent` policy
//! decides which children are visited and which are walked through.

use super::StreamdumpGraph;
use crate::model::{CodecId, GraphId};
use std::collections::HashSet;

/// Stopping policy for a descendant walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Visit every descendant
    Unbounded,
    /// Visit collapsed children but do not walk past them
    StopAtCollapsed,
    /// Like `StopAtCollapsed`, confined to codecs owned by one graph
    WithinGraph(GraphId),
}

impl StreamdumpGraph {
    /// Descendants of `start` in preorder, each reported once; `start` itself
    /// is not included.
    pub fn descendants(&self, start: CodecId, descent: Descent) -> Vec<CodecId> {
        let mut visited: HashSet<CodecId> = HashSet::new();
        let mut found = Vec::new();
        // (codec, next child index)
        let mut stack: Vec<(CodecId, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (codec, next) = *frame;
            let Some(&child) = self.dag.children_of(codec).get(next) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if !self.admits(descent, child) || !visited.insert(child) {
                continue;
            }
            found.push(child);
            if self.descends(descent, child) {
                stack.push((child, 0));
            }
        }

        found
    }

    fn admits(&self, descent: Descent, child: CodecId) -> bool {
        match descent {
            Descent::Unbounded | Descent::StopAtCollapsed => true,
            Descent::WithinGraph(graph) => self.owning_graph(child) == Some(graph),
        }
    }

    fn descends(&self, descent: Descent, child: CodecId) -> bool {
        match descent {
            Descent::Unbounded => true,
            Descent::StopAtCollapsed | Descent::WithinGraph(_) => !self.codec_collapsed(child),
        }
    }
}
