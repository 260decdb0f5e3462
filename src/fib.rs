//------------ ForwardingTable -----------------------------------------------

use log::debug;

use crate::stride::StrideConfig;
use crate::trie::StrideMultiBitTrie;
use crate::types::{RouteEntry, RouteMatch};

/// A forwarding table backed by a [StrideMultiBitTrie].
///
/// The table is built from a list of route entries, after which addresses
/// can be resolved to next-hops. The result of a build does not depend on
/// the order of the entries, as long as no two entries share a prefix with
/// different next-hops. If they do, the entry inserted first is kept.
///
/// ```
/// use stride_fib::{ForwardingTable, Prefix, RouteEntry};
///
/// let table = ForwardingTable::build(vec![
///     RouteEntry::new(Prefix::default_route(), 0xc0a8_0001),
///     RouteEntry::new(Prefix::new(0x0a00_0000, 8).unwrap(), 0x0a00_0001),
/// ]);
///
/// assert_eq!(table.resolve(0x0a01_0203), 0x0a00_0001);
/// assert_eq!(table.resolve(0x0b01_0203), 0xc0a8_0001);
/// ```
#[derive(Debug)]
pub struct ForwardingTable {
    trie: StrideMultiBitTrie,
}

impl ForwardingTable {
    /// Builds a table with the default stride division of `[8, 8, 8, 8]`.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RouteEntry>,
    {
        Self::build_with_strides(StrideConfig::default(), entries)
    }

    pub fn build_with_strides<I>(config: StrideConfig, entries: I) -> Self
    where
        I: IntoIterator<Item = RouteEntry>,
    {
        let mut table = Self {
            trie: StrideMultiBitTrie::with_config(config),
        };
        for entry in entries {
            table.insert(entry);
        }
        debug!(
            "built forwarding table with strides {}: {} routes, {} nodes",
            table.trie.config(),
            table.trie.routes_count(),
            table.trie.nodes_count()
        );
        table
    }

    pub fn insert(&mut self, entry: RouteEntry) {
        self.trie.insert(entry.prefix, entry.next_hop);
    }

    /// Returns the next-hop for `addr`, `0` if there is no route for it.
    pub fn resolve(&self, addr: u32) -> u32 {
        self.trie.lookup(addr)
    }

    pub fn longest_match(&self, addr: u32) -> Option<RouteMatch> {
        self.trie.longest_match(addr)
    }

    /// The number of entries that went into the table.
    pub fn len(&self) -> usize {
        self.trie.routes_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn trie(&self) -> &StrideMultiBitTrie {
        &self.trie
    }
}

//------------ LinearTable ---------------------------------------------------

/// A forwarding table that finds the longest match by scanning all of its
/// entries. Slow, but obviously correct, so it serves as a reference for the
/// trie.
///
/// For entries with an identical prefix the one that came first wins, just
/// like in the trie.
#[derive(Debug, Default, Clone)]
pub struct LinearTable {
    entries: Vec<RouteEntry>,
}

impl LinearTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: RouteEntry) {
        self.entries.push(entry);
    }

    pub fn longest_match(&self, addr: u32) -> Option<&RouteEntry> {
        let mut best: Option<&RouteEntry> = None;
        for entry in self.entries.iter() {
            if !entry.prefix.contains(addr) {
                continue;
            }
            match best {
                Some(b) if b.prefix.len() >= entry.prefix.len() => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    pub fn resolve(&self, addr: u32) -> u32 {
        self.longest_match(addr).map(|e| e.next_hop).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

impl FromIterator<RouteEntry> for LinearTable {
    fn from_iter<T: IntoIterator<Item = RouteEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
