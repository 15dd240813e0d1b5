//! Shop economy - the player's wallet and what it can buy.

use serde::{Deserialize, Serialize};

/// Things the player can spend money on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    Fish,
    FoodBatch,
}

impl Purchase {
    pub fn label(&self) -> &'static str {
        match self {
            Purchase::Fish => "fish",
            Purchase::FoodBatch => "food",
        }
    }
}

/// Currency balance, never negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: u32,
}

impl Wallet {
    pub fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_afford(&self, price: u32) -> bool {
        self.balance >= price
    }

    /// Deduct `price` if the balance covers it; an exactly equal balance is enough
    pub fn try_spend(&mut self, purchase: Purchase, price: u32) -> Result<(), PurchaseError> {
        if !self.can_afford(price) {
            return Err(PurchaseError::InsufficientFunds {
                purchase,
                price,
                balance: self.balance,
            });
        }
        self.balance -= price;
        Ok(())
    }
}

/// Why a purchase was declined. State is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientFunds {
        purchase: Purchase,
        price: u32,
        balance: u32,
    },
}

impl std::fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseError::InsufficientFunds {
                purchase,
                price,
                balance,
            } => write!(
                f,
                "Not enough money for {}: costs {}, you have {}",
                purchase.label(),
                price,
                balance
            ),
        }
    }
}

impl std::error::Error for PurchaseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_exact_balance() {
        let mut wallet = Wallet::new(20);
        assert!(wallet.try_spend(Purchase::Fish, 20).is_ok());
        assert_eq!(wallet.balance(), 0);
    }

    #[test]
    fn test_declined_purchase_keeps_balance() {
        let mut wallet = Wallet::new(4);
        let err = wallet.try_spend(Purchase::FoodBatch, 5).unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                purchase: Purchase::FoodBatch,
                price: 5,
                balance: 4,
            }
        );
        assert_eq!(wallet.balance(), 4);
        assert_eq!(err.to_string(), "Not enough money for food: costs 5, you have 4");
    }
}
