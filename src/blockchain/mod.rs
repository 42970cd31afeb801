// Blockchain module
//
// This module contains the core blockchain implementation including:
// - Block structure and payload variants
// - Blockchain structure with the pending transaction pool
// - Transaction structure
// - Proof of work mining
// - Chain validation and balance replay

pub mod block;
pub mod chain;
pub mod transaction;

// Re-export main components for easier access
pub use block::{Block, BlockPayload};
pub use chain::{Blockchain, BlockchainError, ChainValidity};
pub use transaction::{Address, Transaction};
