//! DAG Index and Topological Sort
//!
//! Adjacency over codec ids built from the surviving streams, plus a
//! precomputed producer-before-consumer order (Kahn's algorithm).
//!
//! Ties among ready codecs resolve in id order: the work-list is seeded in id
//! order and is FIFO, so the same trace always yields the same order.

use crate::error::ConsistencyError;
use crate::model::{CodecId, EntityStore};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct CodecDag {
    /// children[i] = distinct targets of codec i, first-occurrence order
    children: Vec<Vec<CodecId>>,
    /// Topological order
    order: Vec<CodecId>,
    /// position[i] = index of codec i in `order`
    position: Vec<usize>,
}

impl CodecDag {
    /// Build the index from a normalized entity store
    pub fn build(store: &EntityStore) -> Result<Self, ConsistencyError> {
        let mut children: Vec<Vec<CodecId>> = vec![Vec::new(); store.codecs().len()];

        for codec in store.codecs() {
            for &stream_id in &codec.outputs {
                let Some((_, target)) = store.stream(stream_id).and_then(|s| s.endpoints()) else {
                    continue;
                };
                let list = &mut children[codec.id.index()];
                if !list.contains(&target) {
                    list.push(target);
                }
            }
        }

        Self::from_children(children)
    }

    pub(crate) fn from_children(children: Vec<Vec<CodecId>>) -> Result<Self, ConsistencyError> {
        let n = children.len();

        let mut in_degree: Vec<usize> = vec![0; n];
        for list in &children {
            for child in list {
                in_degree[child.index()] += 1;
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order: Vec<CodecId> = Vec::with_capacity(n);

        while let Some(idx) = queue.pop_front() {
            order.push(CodecId::from_index(idx));
            for child in &children[idx] {
                let c = child.index();
                in_degree[c] -= 1;
                if in_degree[c] == 0 {
                    queue.push_back(c);
                }
            }
        }

        if order.len() != n {
            let unresolved: Vec<CodecId> = (0..n)
                .filter(|&i| in_degree[i] > 0)
                .map(CodecId::from_index)
                .collect();
            return Err(ConsistencyError::Cycle { unresolved });
        }

        let mut position = vec![0; n];
        for (pos, codec) in order.iter().enumerate() {
            position[codec.index()] = pos;
        }

        Ok(Self {
            children,
            order,
            position,
        })
    }

    pub fn dag_order(&self) -> &[CodecId] {
        &self.order
    }

    pub fn reverse_dag_order(&self) -> impl Iterator<Item = CodecId> + '_ {
        self.order.iter().rev().copied()
    }

    /// Distinct DAG children; empty for an unknown id
    pub fn children_of(&self, codec: CodecId) -> &[CodecId] {
        self.children
            .get(codec.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_children(&self, codec: CodecId) -> bool {
        !self.children_of(codec).is_empty()
    }

    /// Index of `codec` in `dag_order()`
    pub fn position(&self, codec: CodecId) -> Option<usize> {
        self.position.get(codec.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
