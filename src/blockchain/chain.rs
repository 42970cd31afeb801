use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::block::{Block, BlockPayload};
use super::transaction::{Address, Transaction};

/// A SHA-256 digest has 64 hex characters, so no hash can ever start with
/// more than 64 zeros.
const MAX_DIFFICULTY: u8 = 64;

/// Default mining difficulty (number of leading zero hex characters)
const DEFAULT_DIFFICULTY: u8 = 4;

/// Fixed reward credited to the miner of the next block
const MINING_REWARD: f64 = 100.0;

/// Errors that can occur during blockchain operations
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("Invalid difficulty: {difficulty} (maximum 64)")]
    InvalidDifficulty { difficulty: u8 },

    #[error("The chain has no blocks")]
    EmptyChain,
}

/// The outcome of a full-chain validation pass
///
/// Validation failure is a result, not an error: the interesting information
/// is *which* invariant broke, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainValidity {
    /// Every block is self-consistent and correctly linked to its predecessor
    Valid,

    /// The block at position `index` no longer hashes to its stored hash
    HashMismatch { index: u64 },

    /// The block at position `index` does not reference its predecessor's hash
    LinkMismatch { index: u64 },
}

impl ChainValidity {
    /// Collapses the validation outcome to a plain boolean
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainValidity::Valid)
    }
}

/// Represents the blockchain
///
/// A single-owner, single-threaded structure: all mutation goes through
/// `&mut self`, and independent chains can coexist freely. The block vector
/// is public because the tamper demonstrations (and nothing else) reach into
/// it; the supported API only ever appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockchain {
    /// The chain of blocks, genesis first
    pub chain: Vec<Block>,

    /// Mining difficulty (number of leading zeros required in a block hash)
    difficulty: u8,

    /// Pending transactions to be included in the next mined block
    pending_transactions: Vec<Transaction>,

    /// Mining reward
    mining_reward: f64,
}

impl Blockchain {
    /// Creates a new blockchain with a genesis block
    ///
    /// # Returns
    ///
    /// A new Blockchain instance
    pub fn new() -> Self {
        let mut blockchain = Blockchain {
            chain: Vec::new(),
            difficulty: DEFAULT_DIFFICULTY,
            pending_transactions: Vec::new(),
            mining_reward: MINING_REWARD,
        };

        // Create the genesis block
        blockchain.chain.push(Self::create_genesis_block());

        blockchain
    }

    /// Creates a new blockchain with the given mining difficulty
    ///
    /// # Arguments
    ///
    /// * `difficulty` - The number of leading zero hex characters required
    ///
    /// # Returns
    ///
    /// Result with a new Blockchain instance, or `InvalidDifficulty` if the
    /// difficulty exceeds the length of a SHA-256 hex digest
    pub fn with_difficulty(difficulty: u8) -> Result<Self, BlockchainError> {
        if difficulty > MAX_DIFFICULTY {
            return Err(BlockchainError::InvalidDifficulty { difficulty });
        }

        let mut blockchain = Blockchain::new();
        blockchain.difficulty = difficulty;

        Ok(blockchain)
    }

    /// Creates the genesis block (first block in the chain)
    ///
    /// The genesis block is never mined: its nonce stays 0 and its hash is
    /// computed exactly once, at construction. It carries an empty ledger so
    /// that balance replay can scan every block uniformly.
    fn create_genesis_block() -> Block {
        Block::new(0, BlockPayload::Ledger(Vec::new()), "0".to_string())
    }

    /// Gets the last block in the chain
    ///
    /// # Returns
    ///
    /// Result with a reference to the last block, or `EmptyChain` if the
    /// chain has no blocks (unreachable in normal operation, since the
    /// genesis block is seeded at construction)
    pub fn latest_block(&self) -> Result<&Block, BlockchainError> {
        self.chain.last().ok_or(BlockchainError::EmptyChain)
    }

    /// Mines a caller-constructed block onto the chain
    ///
    /// The candidate's `previous_hash` is rewired to the current latest
    /// block's hash, so whatever hash it was constructed with is provisional
    /// and gets overwritten by mining.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The block to mine and append
    ///
    /// # Returns
    ///
    /// Result with () if successful
    pub fn add_block(&mut self, mut candidate: Block) -> Result<(), BlockchainError> {
        // Link the candidate to the current tip
        candidate.previous_hash = self.latest_block()?.hash.clone();

        // Mining recomputes the hash until it meets the difficulty target
        candidate.mine(self.difficulty);

        self.chain.push(candidate);

        Ok(())
    }

    /// Adds a new transaction to the pending pool
    ///
    /// Unconditional: no balance check, no duplicate check, no authorization.
    ///
    /// # Arguments
    ///
    /// * `transaction` - The transaction to add
    pub fn create_transaction(&mut self, transaction: Transaction) {
        debug!(
            "Accepted transaction of {} to {}",
            transaction.amount, transaction.to
        );
        self.pending_transactions.push(transaction);
    }

    /// Mines the pending transactions into a new block
    ///
    /// Packages the entire pending pool into one block, mines it, appends it,
    /// then reseeds the pool with a single reward transaction for the miner.
    /// The reward is therefore only paid out once the *next* block is mined.
    ///
    /// # Arguments
    ///
    /// * `reward_address` - The address of the miner (to receive the reward)
    ///
    /// # Returns
    ///
    /// Result with () if successful
    pub fn mine_pending_transactions(
        &mut self,
        reward_address: &Address,
    ) -> Result<(), BlockchainError> {
        let (index, previous_hash) = {
            let latest = self.latest_block()?;
            (latest.index + 1, latest.hash.clone())
        };

        // The whole pool goes into the block; nothing carries over
        let transactions = std::mem::take(&mut self.pending_transactions);
        info!(
            "Mining block {} with {} transaction(s)...",
            index,
            transactions.len()
        );

        let mut block = Block::new(index, BlockPayload::Ledger(transactions), previous_hash);
        block.mine(self.difficulty);
        self.chain.push(block);

        // Reseed the pool with the miner's reward
        self.pending_transactions = vec![Transaction::reward(
            reward_address.clone(),
            self.mining_reward,
        )];

        Ok(())
    }

    /// Computes the balance of an address by replaying the full history
    ///
    /// Scans every transaction in every block: debits where the address is
    /// the sender, credits where it is the recipient. Blocks with opaque
    /// payloads contribute nothing. Negative balances are permitted, since
    /// nothing validates spends.
    ///
    /// # Arguments
    ///
    /// * `address` - The address to compute the balance for
    ///
    /// # Returns
    ///
    /// The net balance of the address
    pub fn get_balance_of_address(&self, address: &Address) -> f64 {
        let mut balance = 0.0;

        for block in &self.chain {
            if let BlockPayload::Ledger(transactions) = &block.payload {
                for transaction in transactions {
                    if transaction.from.as_ref() == Some(address) {
                        balance -= transaction.amount;
                    }
                    if transaction.to == *address {
                        balance += transaction.amount;
                    }
                }
            }
        }

        balance
    }

    /// Validates the blockchain
    ///
    /// Walks every block after genesis and checks two invariants, reporting
    /// the first violation found:
    /// 1. the block's stored hash matches a fresh digest of its fields;
    /// 2. the block's `previous_hash` matches the predecessor's stored hash.
    ///
    /// A full O(n) scan with no side effects; re-run it after any suspected
    /// tampering.
    ///
    /// # Returns
    ///
    /// The validation outcome, with the position of the first broken block
    pub fn validate(&self) -> ChainValidity {
        for i in 1..self.chain.len() {
            let current_block = &self.chain[i];
            let previous_block = &self.chain[i - 1];

            // Check if the hash is correct
            if current_block.hash != current_block.calculate_hash() {
                return ChainValidity::HashMismatch { index: i as u64 };
            }

            // Check if the blocks are properly linked together
            if current_block.previous_hash != previous_block.hash {
                return ChainValidity::LinkMismatch { index: i as u64 };
            }
        }

        ChainValidity::Valid
    }

    /// Checks whether the blockchain is valid
    ///
    /// # Returns
    ///
    /// true if the blockchain is valid, false otherwise
    pub fn is_chain_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// Gets the mining difficulty
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Gets the mining reward amount
    pub fn mining_reward(&self) -> f64 {
        self.mining_reward
    }

    /// Gets the pending transactions
    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Blockchain::new()
    }
}
