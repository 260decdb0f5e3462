use std::fmt;

//------------ NodeId --------------------------------------------------------

/// The index of a node in the arena of the trie that created it. Ids are
/// only meaningful for that one trie. An id spans the full index range of
/// the arena, so it can not alias another node however large the trie grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) fn as_index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//------------ RouteAnnotation -----------------------------------------------

/// The route stored at a node.
///
/// `specificity` is the number of bits of the node's incoming chunk that
/// were set by the inserted prefix. It is smaller than the stride of that
/// chunk when the prefix ends inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteAnnotation {
    pub next_hop: u32,
    pub specificity: u8,
}

//------------ StrideNode ----------------------------------------------------

// A node has `2^stride` child slots, where `stride` is the stride of the
// level the node lives on. The slots are allocated on the first child that
// gets stored, so leaves and freshly expanded nodes stay small.
#[derive(Debug)]
pub struct StrideNode {
    stride: u8,
    children: Vec<Option<NodeId>>,
    route: Option<RouteAnnotation>,
}

impl StrideNode {
    pub(crate) fn new(stride: u8) -> Self {
        Self {
            stride,
            children: vec![],
            route: None,
        }
    }

    /// The number of address bits this node branches on. Zero for the
    /// nodes at the deepest level.
    pub fn stride(&self) -> u8 {
        self.stride
    }

    pub fn route(&self) -> Option<RouteAnnotation> {
        self.route
    }

    #[inline]
    pub fn child(&self, slot: usize) -> Option<NodeId> {
        self.children.get(slot).copied().flatten()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(|c| *c)
    }

    pub(crate) fn set_child(&mut self, slot: usize, id: NodeId) {
        if self.children.is_empty() {
            self.children = vec![None; 1_usize << self.stride];
        }
        debug_assert!(slot < self.children.len());
        if let Some(c) = self.children.get_mut(slot) {
            *c = Some(id);
        }
    }

    /// Applies the override rule: the annotation is replaced only if the new
    /// route is strictly more specific than the one already present. Returns
    /// whether the annotation changed.
    pub(crate) fn annotate(&mut self, route: RouteAnnotation) -> bool {
        match self.route {
            Some(existing) if existing.specificity >= route.specificity => {
                false
            }
            _ => {
                self.route = Some(route);
                true
            }
        }
    }
}
