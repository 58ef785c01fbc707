// src/dag/naming.rs

use std::collections::HashMap;

use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::dag::node::TaskNode;

impl TaskGraph {
    /// Collision-free display names for every node.
    ///
    /// Colliding names get a numeric suffix (`name0`, `name1`, ...) in node
    /// order; the last occurrence keeps the bare name. Suffixed names that
    /// would clash with an existing name are skipped. With `apply` the new
    /// names are written back onto the nodes.
    ///
    /// Names are for diagnostics only and never used as identity.
    pub fn unique_node_names(&self, apply: bool) -> HashMap<TaskNode, String> {
        let base_names: Vec<(&TaskNode, String)> =
            self.nodes().iter().map(|node| (node, node.name())).collect();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for (_, name) in &base_names {
            *counts.entry(name.clone()).or_default() += 1;
        }

        let mut unique = HashMap::with_capacity(base_names.len());
        for (node, base) in &base_names {
            let mut current = base.clone();
            let mut suffix = 0usize;
            while counts.get(&current).copied().unwrap_or(0) > 1 {
                if let Some(count) = counts.get_mut(&current) {
                    *count -= 1;
                }
                current = format!("{base}{suffix}");
                *counts.entry(current.clone()).or_default() += 1;
                suffix += 1;
            }
            unique.insert((*node).clone(), current);
        }

        if apply {
            for (node, name) in &unique {
                node.set_name(name.clone());
            }
            debug!(nodes = unique.len(), "applied unique node names");
        }
        unique
    }
}
