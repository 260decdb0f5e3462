use log::trace;

use crate::stride::{bit_chunk, consume, StrideConfig};
use crate::types::errors::ConfigError;
use crate::types::stats::TrieStats;
use crate::types::{Prefix, RouteMatch};

use super::node::{NodeId, RouteAnnotation, StrideNode};
use super::store::NodeArena;

#[cfg(feature = "cli")]
use ansi_term::Colour;

//------------ StrideMultiBitTrie --------------------------------------------

/// A multi-bit trie over IPv4 addresses with a configurable stride per
/// level.
///
/// Prefixes that end on a stride boundary are stored one level below that
/// boundary, in every child of the node the boundary leads to. Prefixes that
/// end inside a stride are expanded over all the child slots that share the
/// specified bits. Each node carries at most one route, and which of several
/// routes landing on the same node wins is decided by the number of bits the
/// route specified in that node's chunk, not by insertion order.
///
/// ```
/// use stride_fib::{Prefix, StrideMultiBitTrie};
///
/// let mut trie = StrideMultiBitTrie::new(&[8, 8, 8, 8]).unwrap();
/// trie.insert(Prefix::new(0x0a00_0000, 8).unwrap(), 1);
/// trie.insert(Prefix::new(0x0a00_0000, 16).unwrap(), 2);
///
/// assert_eq!(trie.lookup(0x0a00_0505), 2);
/// assert_eq!(trie.lookup(0x0a01_0505), 1);
/// assert_eq!(trie.lookup(0x0b00_0000), 0);
/// ```
#[derive(Debug)]
pub struct StrideMultiBitTrie {
    config: StrideConfig,
    store: NodeArena,
    stats: TrieStats,
}

impl StrideMultiBitTrie {
    /// Creates an empty trie, after validating the stride division.
    pub fn new(strides: &[u8]) -> Result<Self, ConfigError> {
        StrideConfig::new(strides).map(Self::with_config)
    }

    pub fn with_config(config: StrideConfig) -> Self {
        let root_stride = config.get(0).unwrap_or(0);
        let stats = TrieStats::new(config.strides());
        Self {
            store: NodeArena::init(StrideNode::new(root_stride)),
            config,
            stats,
        }
    }

    // The descent consumes the prefix one full stride at a time. As soon as
    // the prefix ends inside the chunk of the current level (or exactly at
    // its start), the route is written to every child slot the remaining
    // bits of the prefix can reach.
    //
    // Ex. with strides [8, 8, 8, 8]:
    //
    // pfx       10.0.16.0/20     0000_1010 0000_0000 0001_0000 0000_0000
    // level 0   chunk 10         descend into root[10]
    // level 1   chunk 0          descend into node(10)[0]
    // level 2   4 bits left      rest 0001, slots 0001_0000 ..= 0001_1111
    //                            annotate node(10.0)[16..=31], specificity 4
    pub fn insert(&mut self, prefix: Prefix, next_hop: u32) {
        trace!("insert {} -> {}", prefix, next_hop);
        self.stats.inc_routes();

        let mut window = prefix.addr();
        let mut processed_len: u8 = 0;
        let mut cur_i = self.store.get_root_node_id();

        for (level, stride) in self.config.strides().iter().enumerate() {
            let stride = *stride;
            let child_stride = self.config.get(level + 1).unwrap_or(0);
            let child_level = level as u8 + 1;

            if processed_len + stride > prefix.len() {
                let rest_len = prefix.len() - processed_len;
                let rest = bit_chunk(window, rest_len);
                let span = stride - rest_len;
                let begin = (rest as u64) << span;
                let end = begin + (1_u64 << span);
                trace!(
                    "expand at level {}: {} specified bits, slots \
                    {}..={}",
                    level,
                    rest_len,
                    begin,
                    end - 1
                );

                let route = RouteAnnotation {
                    next_hop,
                    specificity: rest_len,
                };
                for slot in begin..end {
                    let (child, created) = self.store.child_or_insert(
                        cur_i,
                        slot as usize,
                        child_stride,
                    );
                    if created {
                        self.stats.inc_nodes(child_level);
                    }
                    annotate(
                        &mut self.store,
                        &mut self.stats,
                        child,
                        child_level,
                        route,
                    );
                }
                return;
            }

            let nibble = bit_chunk(window, stride);
            let (child, created) =
                self.store
                    .child_or_insert(cur_i, nibble as usize, child_stride);
            if created {
                self.stats.inc_nodes(child_level);
            }
            cur_i = child;
            processed_len += stride;
            window = consume(window, stride);
        }

        // All 32 bits were consumed: a host route, stored in the leaf
        // itself.
        let last_stride = self.config.iter().last().unwrap_or(0);
        let leaf_level = self.config.levels() as u8;
        annotate(
            &mut self.store,
            &mut self.stats,
            cur_i,
            leaf_level,
            RouteAnnotation {
                next_hop,
                specificity: last_stride,
            },
        );
    }

    /// Returns the next-hop of the longest prefix covering `addr`, or `0` if
    /// no prefix covers it.
    pub fn lookup(&self, addr: u32) -> u32 {
        self.longest_match(addr).map(|m| m.next_hop).unwrap_or(0)
    }

    /// Returns the most specific route covering `addr`, if there is one.
    ///
    /// Routes are met in increasing order of specificity while walking down
    /// the trie, so the last one seen is the longest match.
    pub fn longest_match(&self, addr: u32) -> Option<RouteMatch> {
        let mut window = addr;
        let mut consumed: u8 = 0;
        let mut cur_i = self.store.get_root_node_id();
        let mut best = None;

        for (level, stride) in self.config.iter().enumerate() {
            let nibble = bit_chunk(window, stride);
            let child = match self
                .store
                .retrieve_node(cur_i)
                .and_then(|n| n.child(nibble as usize))
            {
                Some(child) => child,
                None => break,
            };
            if let Some(route) =
                self.store.retrieve_node(child).and_then(|n| n.route())
            {
                best = Some(RouteMatch {
                    next_hop: route.next_hop,
                    prefix_len: consumed + route.specificity,
                    level: level as u8 + 1,
                });
            }
            cur_i = child;
            consumed += stride;
            window = consume(window, stride);
        }

        best
    }

    pub fn config(&self) -> &StrideConfig {
        &self.config
    }

    pub fn strides(&self) -> &[u8] {
        self.config.strides()
    }

    /// The number of insert calls made on this trie, including inserts that
    /// did not change any annotation.
    pub fn routes_count(&self) -> usize {
        self.stats.routes
    }

    /// The number of nodes in the trie, including the root.
    pub fn nodes_count(&self) -> usize {
        self.store.get_nodes_len()
    }

    pub fn stats(&self) -> &TrieStats {
        &self.stats
    }

    /// Iterates over all nodes in creation order, starting with the root.
    pub fn nodes(&self) -> impl Iterator<Item = &StrideNode> {
        self.store.iter()
    }
}

// Writes a route to a node under the override rule, and counts it if it
// stuck. Takes the fields of the trie separately, its stride config stays
// borrowed during the insert walk.
fn annotate(
    store: &mut NodeArena,
    stats: &mut TrieStats,
    id: NodeId,
    level: u8,
    route: RouteAnnotation,
) {
    if let Some(node) = store.retrieve_node_mut(id) {
        if node.annotate(route) {
            stats.inc_annotations(level);
        } else {
            trace!(
                "keep existing route at {} (level {}) over {:?}",
                id,
                level,
                route
            );
        }
    }
}

// Bar chart of the nodes created per level.
#[cfg(feature = "cli")]
impl std::fmt::Display for StrideMultiBitTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "stride division {}", self.config)?;
        writeln!(f, "{} routes inserted", self.stats.routes)?;
        writeln!(f, "{} nodes created", self.nodes_count())?;
        writeln!(
            f,
            "size of node: {} bytes (excluding child slots)",
            std::mem::size_of::<StrideNode>()
        )?;
        writeln!(
            f,
            "level\t[{}|{}]",
            Colour::Blue.paint("nodes"),
            Colour::Green.paint("annotations")
        )?;

        let bars = ["▏", "▎", "▍", "▌", "▋", "▊", "▉"];
        let max = self
            .stats
            .created_nodes
            .iter()
            .chain(self.stats.annotations.iter())
            .map(|c| c.count)
            .max()
            .unwrap_or(0)
            .max(1);
        // Scale the longest bar to 40 characters.
        let scale = (max / 40).max(1);

        for (nodes, annotations) in self
            .stats
            .created_nodes
            .iter()
            .zip(self.stats.annotations.iter())
        {
            let level = nodes.depth_level as usize;
            write!(f, "{}\t/{}\t", level, self.config.bits_before(level))?;
            for (count, colour) in [
                (nodes.count, Colour::Blue),
                (annotations.count, Colour::Green),
            ] {
                for _ in 0..(count / scale) {
                    write!(f, "{}", colour.paint("█"))?;
                }
                let partial = (count % scale) * bars.len() / scale;
                if let Some(bar) = bars.get(partial) {
                    write!(f, "{}", colour.paint(*bar))?;
                }
                write!(f, " {}\n\t\t", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
