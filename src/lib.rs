#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

//! A longest-prefix-match engine for IPv4 forwarding.
//!
//! Given a forwarding table of (prefix, next-hop) pairs, this crate builds
//! a lookup structure that returns, for any destination address, the
//! next-hop of the most specific prefix covering it.
//!
//! The lookup structure is a multi-bit trie with a variable stride: the
//! number of address bits consumed at each depth of the trie is
//! configurable, e.g. `[8, 8, 8, 8]` or `[16, 4, 4, 8]`, as long as the
//! strides add up to 32. Prefixes whose length does not fall on a stride
//! boundary are expanded over all the child slots they cover (controlled
//! prefix expansion[^1]).
//!
//! The trie is built once, and then queried. Lookups take a shared
//! reference, so a fully built trie can be queried from many threads at
//! once. Inserts need exclusive access.
//!
//! ```
//! use stride_fib::{parse, ForwardingTable, StrideConfig};
//!
//! let dump = "\
//! S* 0.0.0.0/0         192.168.0.1
//! B  10.0.0.0/8        10.255.0.1
//! B  10.0.16.0/20      10.255.0.2
//! ";
//! let routes = parse::read_routes(dump.as_bytes()).unwrap();
//! let table = ForwardingTable::build_with_strides(
//!     "16,4,4,8".parse::<StrideConfig>().unwrap(),
//!     routes,
//! );
//!
//! let next_hop = table.resolve(parse::parse_addr("10.0.20.1").unwrap());
//! assert_eq!(parse::format_addr(next_hop), "10.255.0.2");
//! ```
//!
//! [^1]: <https://doi.org/10.1145/277851.277863>
#[macro_use]
mod macros;

mod fib;
mod stride;
mod trie;
mod types;

pub mod parse;

// Public Interfaces on the root of the crate

/// The forwarding table, and a brute-force reference table
pub use fib::{ForwardingTable, LinearTable};

/// Stride division of a trie
pub use stride::{StrideConfig, ADDR_BITS};

/// The trie and its nodes
pub use trie::{NodeId, RouteAnnotation, StrideMultiBitTrie, StrideNode};

/// Prefixes, routes and lookup results
pub use types::{Prefix, RouteEntry, RouteMatch};

/// Error types returned by this crate
pub use types::errors;

/// Per-level statistics of a trie
pub use types::stats;
