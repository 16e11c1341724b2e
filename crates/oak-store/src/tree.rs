//! B-tree facade: owns the root handle and dispatches operations.

use std::sync::Arc;

use oak_common::Result;

use crate::block::Block;
use crate::disk::BlockStore;
use crate::node::Node;
use crate::pair::Pair;

/// The disk-resident B-tree.
///
/// Holds the current root node, which always lives at block 0. When
/// the root splits, a new internal root inheriting block 0 is written
/// over the old root content (whose payload has already moved into two
/// freshly allocated children).
pub struct BTree {
    root: Node,
    store: Arc<BlockStore>,
}

impl BTree {
    /// Opens the tree over the given block store, bootstrapping the
    /// root block on an empty file.
    pub fn open(store: Arc<BlockStore>) -> Result<Self> {
        let block = store.root_block()?;
        let root = Node::from_block(block, Arc::clone(&store));
        Ok(Self { root, store })
    }

    /// Inserts a pair, promoting a new root if the split reaches it.
    pub fn insert(&mut self, pair: Pair) -> Result<()> {
        let Some(split) = self.root.insert(pair)? else {
            return Ok(());
        };

        let mut promoted = Block::new(0);
        promoted.pairs = vec![split.middle];
        promoted.children = vec![split.left_id, split.right_id];
        self.store.write_block(&promoted)?;
        self.root = Node::from_block(promoted, Arc::clone(&self.store));
        Ok(())
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.root.get(key)
    }

    /// Deletes a key, rebalancing on the way back up.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        // The root is exempt from minimum occupancy and resolves its
        // children's underflow itself, so nothing propagates out.
        self.root.delete(key)?;
        Ok(())
    }

    /// The current root node.
    pub fn root(&self) -> &Node {
        &self.root
    }
}
