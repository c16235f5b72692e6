//! Balance operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{validate_balances, UserBalance};

impl Database {
    /// Get a user's balances, if they have been set up
    pub fn get_balance(&self, user_id: &str) -> Result<Option<UserBalance>> {
        let conn = self.conn()?;
        let balance = conn
            .query_row(
                "SELECT user_id, account_balance, cash_balance, created_at, updated_at
                 FROM user_balances WHERE user_id = ?",
                params![user_id],
                |row| {
                    let created_at_str: String = row.get(3)?;
                    let updated_at_str: String = row.get(4)?;
                    Ok(UserBalance {
                        user_id: row.get(0)?,
                        account_balance: row.get(1)?,
                        cash_balance: row.get(2)?,
                        created_at: parse_datetime(&created_at_str),
                        updated_at: parse_datetime(&updated_at_str),
                    })
                },
            )
            .optional()?;

        Ok(balance)
    }

    /// Create the user's balance row with starting amounts
    pub fn setup_balance(
        &self,
        user_id: &str,
        account_balance: f64,
        cash_balance: f64,
    ) -> Result<UserBalance> {
        validate_balances(account_balance, cash_balance)?;

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT INTO user_balances (user_id, account_balance, cash_balance) VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO NOTHING",
            params![user_id, account_balance, cash_balance],
        )?;
        drop(conn);

        if inserted == 0 {
            return Err(Error::Conflict(format!(
                "Balances for {} are already set up",
                user_id
            )));
        }

        info!(user = user_id, account_balance, cash_balance, "Set up balances");

        self.get_balance(user_id)?
            .ok_or_else(|| Error::NotFound(format!("Balances for {}", user_id)))
    }

    /// Overwrite both balances with values entered by the user
    pub fn update_balance(
        &self,
        user_id: &str,
        account_balance: f64,
        cash_balance: f64,
    ) -> Result<UserBalance> {
        validate_balances(account_balance, cash_balance)?;

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE user_balances
             SET account_balance = ?, cash_balance = ?, updated_at = CURRENT_TIMESTAMP
             WHERE user_id = ?",
            params![account_balance, cash_balance, user_id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Balances for {}", user_id)));
        }

        info!(user = user_id, account_balance, cash_balance, "Updated balances");

        self.get_balance(user_id)?
            .ok_or_else(|| Error::NotFound(format!("Balances for {}", user_id)))
    }
}
