//------------ Types for Statistics -----------------------------------------

use std::fmt::{Debug, Display};

use serde_derive::Serialize;

/// Per-level counters of a [StrideMultiBitTrie](crate::StrideMultiBitTrie).
///
/// Level 0 is the root. A route annotation is counted every time the
/// override rule actually writes one, so re-annotating a node with a more
/// specific route counts twice.
#[derive(Clone, Serialize)]
pub struct TrieStats {
    pub strides: Vec<u8>,
    pub created_nodes: Vec<LevelCount>,
    pub annotations: Vec<LevelCount>,
    pub routes: usize,
}

impl TrieStats {
    pub(crate) fn new(strides: &[u8]) -> Self {
        // One level more than there are strides: the nodes at the last
        // level are leaves.
        let levels = strides.len() as u8 + 1;
        let mut created_nodes = Self::levels_vec(levels);
        if let Some(root) = created_nodes.first_mut() {
            root.count = 1;
        }
        Self {
            strides: strides.to_vec(),
            created_nodes,
            annotations: Self::levels_vec(levels),
            routes: 0,
        }
    }

    fn levels_vec(num_depth_levels: u8) -> Vec<LevelCount> {
        (0..num_depth_levels)
            .map(|depth_level| LevelCount {
                depth_level,
                count: 0,
            })
            .collect()
    }

    pub(crate) fn inc_nodes(&mut self, depth_level: u8) {
        if let Some(n) = self.created_nodes.get_mut(depth_level as usize) {
            n.count += 1
        }
    }

    pub(crate) fn inc_annotations(&mut self, depth_level: u8) {
        if let Some(n) = self.annotations.get_mut(depth_level as usize) {
            n.count += 1
        }
    }

    pub(crate) fn inc_routes(&mut self) {
        self.routes += 1;
    }

    pub fn nodes_count(&self) -> usize {
        self.created_nodes.iter().map(|n| n.count).sum()
    }

    pub fn annotations_count(&self) -> usize {
        self.annotations.iter().map(|n| n.count).sum()
    }
}

impl Debug for TrieStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} nodes:{:>8?} {:?} routes:{}",
            self.strides,
            self.nodes_count(),
            self.created_nodes,
            self.routes
        )
    }
}

impl Display for TrieStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "stride division {:?}", self.strides)?;
        writeln!(f, "{} routes inserted", self.routes)?;
        writeln!(f, "{} nodes created", self.nodes_count())?;
        writeln!(f, "level\tbits\tnodes\tannotations")?;
        let mut bits = 0_u8;
        for (nodes, annotations) in
            self.created_nodes.iter().zip(self.annotations.iter())
        {
            writeln!(
                f,
                "{}\t/{}\t{}\t{}",
                nodes.depth_level, bits, nodes.count, annotations.count
            )?;
            if let Some(s) = self.strides.get(nodes.depth_level as usize) {
                bits += s;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Serialize)]
pub struct LevelCount {
    pub depth_level: u8,
    pub count: usize,
}

impl Debug for LevelCount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_fmt(format_args!("/{}: {}", &self.depth_level, &self.count))
    }
}
