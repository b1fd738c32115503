use crate::data::database::Database;
use crate::data::models::wallet::{NewWallet, Wallet};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

/// Outcome of a balance mutation under the wallet row lock.
#[derive(Debug, PartialEq, Eq)]
pub enum BalanceWriteOutcome {
    Applied,
    InsufficientFunds,
}

pub struct WalletRepo {}

impl WalletRepo {
    pub fn new() -> Self {
        WalletRepo {}
    }

    /// Fetches a user's wallet, creating a zero-balance row on first use.
    pub async fn get_or_create(&self, owner_id: i32) -> Result<Wallet, result::Error> {
        use crate::data::models::schema::wallets::dsl::{user_id, wallets};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<Wallet, result::Error, _>(|connection| {
            async move {
                match wallets
                    .filter(user_id.eq(owner_id))
                    .first::<Wallet>(connection)
                    .await
                {
                    Ok(value) => Ok(value),
                    Err(result::Error::NotFound) => {
                        let new_wallet = NewWallet {
                            user_id: owner_id,
                            balance: BigDecimal::from(0),
                        };
                        diesel::insert_into(wallets)
                            .values(&new_wallet)
                            .execute(connection)
                            .await?;

                        wallets
                            .filter(user_id.eq(owner_id))
                            .first::<Wallet>(connection)
                            .await
                    }
                    Err(e) => Err(e),
                }
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn credit(
        &self,
        owner_id: i32,
        amount: BigDecimal,
    ) -> Result<Wallet, result::Error> {
        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<Wallet, result::Error, _>(|connection| {
            async move {
                Self::credit_locked(connection, owner_id, amount).await?;
                Self::load_locked(connection, owner_id).await
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn debit(
        &self,
        owner_id: i32,
        amount: BigDecimal,
    ) -> Result<(BalanceWriteOutcome, Wallet), result::Error> {
        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<(BalanceWriteOutcome, Wallet), result::Error, _>(|connection| {
            async move {
                let outcome = Self::debit_locked(connection, owner_id, amount).await?;
                let wallet = Self::load_locked(connection, owner_id).await?;
                Ok((outcome, wallet))
            }
            .scope_boxed()
        })
        .await
    }

    /// Debit + credit in one unit of work. Nothing moves when the source
    /// balance is short.
    pub async fn transfer(
        &self,
        from_user_id: i32,
        to_user_id: i32,
        amount: BigDecimal,
    ) -> Result<BalanceWriteOutcome, result::Error> {
        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<BalanceWriteOutcome, result::Error, _>(|connection| {
            async move {
                let outcome =
                    Self::debit_locked(connection, from_user_id, amount.clone()).await?;
                if outcome == BalanceWriteOutcome::InsufficientFunds {
                    return Ok(outcome);
                }
                Self::credit_locked(connection, to_user_id, amount).await?;
                Ok(BalanceWriteOutcome::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    async fn load_locked(
        connection: &mut AsyncMysqlConnection,
        owner_id: i32,
    ) -> Result<Wallet, result::Error> {
        use crate::data::models::schema::wallets::dsl::{user_id, wallets};

        wallets
            .filter(user_id.eq(owner_id))
            .for_update()
            .first::<Wallet>(connection)
            .await
    }

    async fn ensure_row(
        connection: &mut AsyncMysqlConnection,
        owner_id: i32,
    ) -> Result<Wallet, result::Error> {
        use crate::data::models::schema::wallets::dsl::wallets;

        match Self::load_locked(connection, owner_id).await {
            Ok(value) => Ok(value),
            Err(result::Error::NotFound) => {
                let new_wallet = NewWallet {
                    user_id: owner_id,
                    balance: BigDecimal::from(0),
                };
                diesel::insert_into(wallets)
                    .values(&new_wallet)
                    .execute(connection)
                    .await?;
                Self::load_locked(connection, owner_id).await
            }
            Err(e) => Err(e),
        }
    }

    async fn credit_locked(
        connection: &mut AsyncMysqlConnection,
        owner_id: i32,
        amount: BigDecimal,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::wallets::dsl::{balance, user_id, wallets};

        let wallet = Self::ensure_row(connection, owner_id).await?;

        diesel::update(wallets.filter(user_id.eq(owner_id)))
            .set(balance.eq(wallet.balance + amount))
            .execute(connection)
            .await?;

        Ok(())
    }

    async fn debit_locked(
        connection: &mut AsyncMysqlConnection,
        owner_id: i32,
        amount: BigDecimal,
    ) -> Result<BalanceWriteOutcome, result::Error> {
        use crate::data::models::schema::wallets::dsl::{balance, user_id, wallets};

        let wallet = Self::ensure_row(connection, owner_id).await?;

        if wallet.balance < amount {
            return Ok(BalanceWriteOutcome::InsufficientFunds);
        }

        diesel::update(wallets.filter(user_id.eq(owner_id)))
            .set(balance.eq(wallet.balance - amount))
            .execute(connection)
            .await?;

        Ok(BalanceWriteOutcome::Applied)
    }
}

impl Default for WalletRepo {
    fn default() -> Self {
        Self::new()
    }
}
