use log::info;
use serde_json::json;

use simple_blockchain::{Address, Block, BlockPayload, Blockchain, BlockchainError, Transaction};

/// Walks through the data-chain variant: append opaque blocks, validate,
/// tamper, validate again.
fn data_chain_demo() -> Result<(), BlockchainError> {
    info!("--- Data chain demo ---");

    let mut blockchain = Blockchain::new();

    info!("Mining block 1...");
    blockchain.add_block(Block::new(
        1,
        BlockPayload::Opaque(json!({ "amount": 4 })),
        "0".to_string(),
    ))?;

    info!("Mining block 2...");
    blockchain.add_block(Block::new(
        2,
        BlockPayload::Opaque(json!({ "amount": 10 })),
        "0".to_string(),
    ))?;

    info!("Is blockchain valid? {:?}", blockchain.validate());

    // Deliberate misuse: mutate a mined block in place. The stored hash is
    // now stale, which the validator reports as a hash mismatch.
    blockchain.chain[1].payload = BlockPayload::Opaque(json!({ "amount": 100 }));
    info!("After tampering: {:?}", blockchain.validate());

    // Recomputing the tampered block's hash makes it self-consistent again,
    // but block 2 still points at the old hash.
    let rehashed = blockchain.chain[1].calculate_hash();
    blockchain.chain[1].hash = rehashed;
    info!("After re-hashing the tampered block: {:?}", blockchain.validate());

    Ok(())
}

/// Walks through the ledger variant: queue transactions, mine, collect the
/// reward on the following block, check balances.
fn ledger_chain_demo() -> Result<(), BlockchainError> {
    info!("--- Ledger chain demo ---");

    let mut blockchain = Blockchain::new();
    let alice = Address::from("alice");
    let bob = Address::from("bob");
    let miner = Address::from("miner");

    blockchain.create_transaction(Transaction::new(alice.clone(), bob.clone(), 50.0));
    blockchain.create_transaction(Transaction::new(bob.clone(), alice.clone(), 20.0));

    info!("Starting the miner...");
    blockchain.mine_pending_transactions(&miner)?;

    info!("Balance of alice: {}", blockchain.get_balance_of_address(&alice));
    info!("Balance of bob: {}", blockchain.get_balance_of_address(&bob));

    // The reward sits in the pending pool until the next block is mined
    info!("Balance of miner: {}", blockchain.get_balance_of_address(&miner));

    info!("Mining again to collect the reward...");
    blockchain.mine_pending_transactions(&miner)?;
    info!("Balance of miner: {}", blockchain.get_balance_of_address(&miner));

    info!("Is blockchain valid? {}", blockchain.is_chain_valid());

    Ok(())
}

fn main() -> Result<(), BlockchainError> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    data_chain_demo()?;
    ledger_chain_demo()?;

    Ok(())
}
