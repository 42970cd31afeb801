use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::transaction::Transaction;

/// The payload carried by a block
///
/// Blocks either carry arbitrary application data or an ordered list of
/// transactions; the two kinds never mix within one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockPayload {
    /// Opaque, JSON-serializable application data
    Opaque(serde_json::Value),

    /// An ordered list of transactions
    Ledger(Vec<Transaction>),
}

impl Default for BlockPayload {
    fn default() -> Self {
        BlockPayload::Ledger(Vec::new())
    }
}

/// Represents a block in the blockchain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Index of the block in the chain
    pub index: u64,

    /// Timestamp when the block was created
    pub timestamp: DateTime<Utc>,

    /// The block's payload
    pub payload: BlockPayload,

    /// Hash of the previous block ("0" for the genesis block)
    pub previous_hash: String,

    /// Proof of work counter, incremented during mining
    pub nonce: u64,

    /// Hash of the current block (calculated)
    ///
    /// Cached, not derived: mutating any other field leaves this stale until
    /// `calculate_hash` is called again, which is exactly the inconsistency
    /// the chain validator detects.
    pub hash: String,
}

impl Block {
    /// Creates a new block
    ///
    /// The nonce starts at 0 and the hash is computed immediately from the
    /// initial, unmined state.
    ///
    /// # Arguments
    ///
    /// * `index` - The index of the block in the chain
    /// * `payload` - The payload to include in the block
    /// * `previous_hash` - The hash of the previous block
    ///
    /// # Returns
    ///
    /// A new Block instance
    pub fn new(index: u64, payload: BlockPayload, previous_hash: String) -> Self {
        let block = Block {
            index,
            timestamp: Utc::now(),
            payload,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        };

        let hash = block.calculate_hash();

        Block { hash, ..block }
    }

    /// Calculates the hash of the block
    ///
    /// Deterministic in the current field values. The field set and its
    /// serialization must stay identical between construction, mining and
    /// validation, or all three disagree.
    ///
    /// # Returns
    ///
    /// The SHA-256 hash of the block as a lowercase hexadecimal string
    pub fn calculate_hash(&self) -> String {
        let mut hasher = Sha256::new();

        // Convert the block to a JSON string (the hash field itself excluded)
        let block_data = serde_json::json!({
            "index": self.index,
            "previous_hash": self.previous_hash,
            "timestamp": self.timestamp,
            "payload": self.payload,
            "nonce": self.nonce,
        });

        let block_string = serde_json::to_string(&block_data).unwrap();

        // Update the hasher with the block data
        hasher.update(block_string.as_bytes());

        // Return the hash as a hexadecimal string
        hex::encode(hasher.finalize())
    }

    /// Mines the block by brute force
    ///
    /// Increments the nonce and recomputes the hash until the hash's first
    /// `difficulty` hex characters are all '0'. Blocking and unbounded: a
    /// high difficulty keeps this loop busy for a long time. With
    /// `difficulty = 0` the constructed hash is accepted as-is.
    ///
    /// # Arguments
    ///
    /// * `difficulty` - The number of leading zero hex characters required
    pub fn mine(&mut self, difficulty: u8) {
        let target = "0".repeat(difficulty as usize);

        while !self.hash.starts_with(&target) {
            self.nonce += 1;
            self.hash = self.calculate_hash();
        }

        info!("Block mined: {} (nonce {})", self.hash, self.nonce);
    }
}
