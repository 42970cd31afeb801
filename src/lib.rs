//! A toy blockchain for teaching purposes: SHA-256 hash-linked blocks,
//! brute-force proof-of-work mining, tamper detection and a minimal
//! transaction ledger with replay-based balances.
//!
//! Everything is in-process and synchronous. There is no networking, no
//! consensus, no signatures and no persistence here, on purpose.

pub mod blockchain;

pub use blockchain::{Address, Block, BlockPayload, Blockchain, BlockchainError, ChainValidity, Transaction};
