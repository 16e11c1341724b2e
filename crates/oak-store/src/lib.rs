//! Storage engine for OakDB.
//!
//! This crate provides:
//! - Fixed-width pair records for key-value data
//! - A 4096-byte block codec and a positioned block store over a single file
//! - The in-memory node layer with split, borrow, and merge mechanics
//! - The B-tree facade dispatching insert/get/delete
//! - A locked store handle and a process-wide handle registry

mod block;
mod disk;
mod node;
mod pair;
mod store;
mod tree;

pub use block::{Block, BLOCK_SIZE, MAX_LEAF_SIZE, MIN_LEAF_SIZE};
pub use disk::BlockStore;
pub use node::Node;
pub use pair::{Pair, MAX_KEY_LEN, MAX_VALUE_LEN, PAIR_SIZE};
pub use store::{Store, StoreRegistry};
pub use tree::BTree;
