use serde::{Deserialize, Serialize};

use std::fmt;

/// Represents an address on the ledger
///
/// Addresses are plain identifiers. There is no key material behind them and
/// no ownership check anywhere: anyone can construct a transaction from any
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Address(s)
    }
}

/// Represents a transaction in the ledger
///
/// A plain value object: no signature, no fee, no validation of any kind.
/// Acceptance is implicit when the transaction is pushed onto the pending
/// pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender's address, or `None` for a system-issued mining reward
    pub from: Option<Address>,

    /// Recipient's address
    pub to: Address,

    /// Amount being transferred
    pub amount: f64,
}

impl Transaction {
    /// Creates a new transaction between two addresses
    ///
    /// # Arguments
    ///
    /// * `from` - The address of the sender
    /// * `to` - The address of the recipient
    /// * `amount` - The amount to transfer
    ///
    /// # Returns
    ///
    /// A new Transaction instance
    pub fn new(from: Address, to: Address, amount: f64) -> Self {
        Transaction {
            from: Some(from),
            to,
            amount,
        }
    }

    /// Creates a mining reward transaction
    ///
    /// Reward transactions have no sender: the amount is issued by the
    /// system, with no counterparting debit.
    ///
    /// # Arguments
    ///
    /// * `to` - The address of the miner
    /// * `amount` - The reward amount
    ///
    /// # Returns
    ///
    /// A new Transaction instance
    pub fn reward(to: Address, amount: f64) -> Self {
        Transaction {
            from: None,
            to,
            amount,
        }
    }

    /// Checks if the transaction is a system-issued mining reward
    pub fn is_reward(&self) -> bool {
        self.from.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction() {
        let transaction = Transaction::new(Address::from("alice"), Address::from("bob"), 10.5);

        assert_eq!(transaction.from, Some(Address::from("alice")));
        assert_eq!(transaction.to, Address::from("bob"));
        assert_eq!(transaction.amount, 10.5);
        assert!(!transaction.is_reward());
    }

    #[test]
    fn test_reward_transaction() {
        let transaction = Transaction::reward(Address::from("miner"), 100.0);

        assert!(transaction.from.is_none());
        assert_eq!(transaction.to, Address::from("miner"));
        assert_eq!(transaction.amount, 100.0);
        assert!(transaction.is_reward());
    }

    #[test]
    fn test_transaction_serialization() {
        let transaction = Transaction::new(Address::from("alice"), Address::from("bob"), 10.0);

        let json = serde_json::to_string(&transaction).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(transaction, deserialized);

        // A reward's missing sender serializes as an explicit null
        let reward = Transaction::reward(Address::from("miner"), 100.0);
        let json = serde_json::to_string(&reward).unwrap();
        assert_eq!(json, r#"{"from":null,"to":"miner","amount":100.0}"#);
    }

    #[test]
    fn test_address_display() {
        let address = Address::from("alice");
        assert_eq!(address.to_string(), "alice");
    }
}
