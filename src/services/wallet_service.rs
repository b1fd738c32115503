use crate::data::models::wallet::Wallet;
use crate::data::repos::implementors::wallet_repo::{BalanceWriteOutcome, WalletRepo};
use crate::services::errors::WalletServiceError;
use bigdecimal::BigDecimal;

/// The points ledger. Checkout never touches it; seller-incentive flows
/// credit and debit through this contract.
pub struct WalletService;

impl WalletService {
    pub fn new() -> Self {
        WalletService
    }

    pub async fn get_wallet(&self, user_id: i32) -> Result<Wallet, WalletServiceError> {
        let repo = WalletRepo::new();
        repo.get_or_create(user_id)
            .await
            .map_err(|_| WalletServiceError::DatabaseError)
    }

    pub async fn credit(
        &self,
        user_id: i32,
        amount: BigDecimal,
    ) -> Result<Wallet, WalletServiceError> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletServiceError::InvalidAmount);
        }

        let repo = WalletRepo::new();
        repo.credit(user_id, amount)
            .await
            .map_err(|_| WalletServiceError::DatabaseError)
    }

    pub async fn debit(
        &self,
        user_id: i32,
        amount: BigDecimal,
    ) -> Result<Wallet, WalletServiceError> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletServiceError::InvalidAmount);
        }

        let repo = WalletRepo::new();
        let (outcome, wallet) = repo
            .debit(user_id, amount)
            .await
            .map_err(|_| WalletServiceError::DatabaseError)?;

        match outcome {
            BalanceWriteOutcome::Applied => Ok(wallet),
            BalanceWriteOutcome::InsufficientFunds => Err(WalletServiceError::InsufficientFunds),
        }
    }

    pub async fn transfer(
        &self,
        from_user_id: i32,
        to_user_id: i32,
        amount: BigDecimal,
    ) -> Result<(), WalletServiceError> {
        if amount <= BigDecimal::from(0) {
            return Err(WalletServiceError::InvalidAmount);
        }

        let repo = WalletRepo::new();
        match repo
            .transfer(from_user_id, to_user_id, amount)
            .await
            .map_err(|_| WalletServiceError::DatabaseError)?
        {
            BalanceWriteOutcome::Applied => Ok(()),
            BalanceWriteOutcome::InsufficientFunds => Err(WalletServiceError::InsufficientFunds),
        }
    }
}

impl Default for WalletService {
    fn default() -> Self {
        Self::new()
    }
}
