use super::node::{NodeId, StrideNode};

//------------ NodeArena -----------------------------------------------------

// All nodes of a trie live in one vec, and refer to each other by their index
// in it. The root is stored first, at index zero. Nodes are never removed,
// so an id handed out by `store_node` stays valid for the lifetime of the
// arena.
#[derive(Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<StrideNode>,
}

impl NodeArena {
    pub(crate) fn init(root: StrideNode) -> Self {
        Self { nodes: vec![root] }
    }

    pub(crate) fn get_root_node_id(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn store_node(&mut self, next_node: StrideNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(next_node);
        id
    }

    #[inline]
    pub(crate) fn retrieve_node(&self, id: NodeId) -> Option<&StrideNode> {
        self.nodes.get(id.as_index())
    }

    #[inline]
    pub(crate) fn retrieve_node_mut(
        &mut self,
        id: NodeId,
    ) -> Option<&mut StrideNode> {
        self.nodes.get_mut(id.as_index())
    }

    /// Returns the child of `parent` in `slot`, creating it with `stride` if
    /// it doesn't exist yet. The boolean is true for a newly created node.
    pub(crate) fn child_or_insert(
        &mut self,
        parent: NodeId,
        slot: usize,
        stride: u8,
    ) -> (NodeId, bool) {
        if let Some(id) =
            self.retrieve_node(parent).and_then(|n| n.child(slot))
        {
            return (id, false);
        }
        let id = self.store_node(StrideNode::new(stride));
        if let Some(node) = self.retrieve_node_mut(parent) {
            node.set_child(slot, id);
        }
        (id, true)
    }

    pub(crate) fn get_nodes_len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &StrideNode> {
        self.nodes.iter()
    }
}
