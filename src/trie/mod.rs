mod node;
mod store;
mod tree;

#[cfg(test)]
mod tests;

pub use node::{NodeId, RouteAnnotation, StrideNode};
pub use tree::StrideMultiBitTrie;
