use std::error::Error;

use super::node::{NodeId, RouteAnnotation, StrideNode};
use super::store::NodeArena;
use super::StrideMultiBitTrie;
use crate::stride::{bit_chunk, consume};
use crate::Prefix;

//------------ Bit chunks ---------------------------------------------------

#[test]
fn test_bit_chunks() {
    let window = 0b1010_0101_1111_0000_1100_0011_0110_1001;
    assert_eq!(bit_chunk(window, 0), 0);
    assert_eq!(bit_chunk(window, 1), 0b1);
    assert_eq!(bit_chunk(window, 4), 0b1010);
    assert_eq!(bit_chunk(window, 12), 0b1010_0101_1111);
    assert_eq!(bit_chunk(window, 32), window);

    let window = consume(window, 4);
    assert_eq!(bit_chunk(window, 4), 0b0101);
    let window = consume(window, 24);
    assert_eq!(bit_chunk(window, 4), 0b1001);
    assert_eq!(consume(window, 4), 0);
    assert_eq!(consume(u32::MAX, 32), 0);
}

//------------ Override rule ------------------------------------------------

#[test]
fn test_annotate_keeps_more_specific() {
    let mut node = StrideNode::new(8);
    assert!(node.annotate(RouteAnnotation {
        next_hop: 1,
        specificity: 3
    }));
    // less specific
    assert!(!node.annotate(RouteAnnotation {
        next_hop: 2,
        specificity: 1
    }));
    // equally specific, first one stays
    assert!(!node.annotate(RouteAnnotation {
        next_hop: 3,
        specificity: 3
    }));
    assert_eq!(node.route().map(|r| r.next_hop), Some(1));

    assert!(node.annotate(RouteAnnotation {
        next_hop: 4,
        specificity: 4
    }));
    assert_eq!(
        node.route(),
        Some(RouteAnnotation {
            next_hop: 4,
            specificity: 4
        })
    );
}

#[test]
fn test_children_allocated_lazily() {
    let node = StrideNode::new(16);
    assert_eq!(node.children().count(), 0);
    assert_eq!(node.child(0), None);
    assert_eq!(node.child(70_000), None);
}

//------------ Node ids -----------------------------------------------------

#[test]
fn test_node_ids_follow_arena_index() {
    let mut arena = NodeArena::init(StrideNode::new(8));
    assert_eq!(arena.get_root_node_id(), NodeId(0));

    let (first, created) = arena.child_or_insert(NodeId(0), 3, 8);
    assert!(created);
    let (second, _) = arena.child_or_insert(NodeId(0), 4, 8);
    assert_eq!(first.as_index(), 1);
    assert_eq!(second.as_index(), 2);
    assert_eq!(arena.child_or_insert(NodeId(0), 3, 8), (first, false));
    assert_eq!(arena.get_nodes_len(), 3);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_node_ids_past_u32_range_stay_distinct() {
    let past = NodeId(u32::MAX as usize + 1);
    assert_eq!(past.as_index(), 1 << 32);
    assert_ne!(past, NodeId(0));
    assert_eq!(past.to_string(), "#4294967296");
}

//------------ Trie layout --------------------------------------------------

#[test]
fn test_expansion_layout() -> Result<(), Box<dyn Error>> {
    let mut trie = StrideMultiBitTrie::new(&[8, 8, 8, 8])?;

    // root + node(10) + node(10.0) + 16 expanded children
    trie.insert(Prefix::new(0x0a00_1000, 20)?, 7);
    assert_eq!(trie.nodes_count(), 19);
    assert_eq!(trie.stats().created_nodes.get(3).map(|c| c.count), Some(16));
    assert_eq!(trie.stats().annotations.get(3).map(|c| c.count), Some(16));

    let m = trie.longest_match(0x0a00_1f01).ok_or("no match")?;
    assert_eq!(m.next_hop, 7);
    assert_eq!(m.prefix_len, 20);
    assert_eq!(m.level, 3);

    // a host route ends up in a leaf with the full last stride
    trie.insert(Prefix::host(0x0a00_1f01), 9);
    let m = trie.longest_match(0x0a00_1f01).ok_or("no match")?;
    assert_eq!((m.next_hop, m.prefix_len, m.level), (9, 32, 4));
    assert_eq!(trie.routes_count(), 2);
    Ok(())
}

#[test]
fn test_prefix_on_stride_boundary_goes_one_level_down(
) -> Result<(), Box<dyn Error>> {
    let mut trie = StrideMultiBitTrie::new(&[4, 4, 24])?;
    trie.insert(Prefix::new(0x1000_0000, 4)?, 1);

    // node(1) exists without a route, all of its 16 children carry one
    // with zero specified bits.
    let m = trie.longest_match(0x1234_5678).ok_or("no match")?;
    assert_eq!((m.prefix_len, m.level), (4, 2));
    assert_eq!(trie.nodes_count(), 1 + 1 + 16);
    assert_eq!(
        trie.nodes()
            .filter_map(|n| n.route())
            .filter(|r| r.specificity == 0)
            .count(),
        16
    );
    Ok(())
}

#[test]
fn test_default_route_covers_root() -> Result<(), Box<dyn Error>> {
    let mut trie = StrideMultiBitTrie::new(&[4, 4, 4, 4, 4, 4, 4, 4])?;
    trie.insert(Prefix::default_route(), 5);
    assert_eq!(trie.nodes_count(), 17);
    assert_eq!(trie.stats().annotations.get(1).map(|c| c.count), Some(16));
    assert_eq!(trie.lookup(0), 5);
    assert_eq!(trie.lookup(u32::MAX), 5);
    Ok(())
}
