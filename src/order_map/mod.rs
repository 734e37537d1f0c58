//! Ordered-map primitives: a balanced BST (AVL, representative of the
//! red-black/B-tree family — see `DESIGN.md` for why only one balanced-BST
//! shape is carried) and a van Emde Boas tree for bounded integer universes.

mod avl;
mod veb;

pub use avl::AvlMap;
pub use veb::VebTree;
