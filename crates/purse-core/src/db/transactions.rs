//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, PaymentMethod, Transaction, TransactionType};

const TRANSACTION_COLUMNS: &str = "id, user_id, amount, type, category, payment_method, \
     description, transaction_date, created_at, updated_at";

impl Database {
    /// Record a transaction and apply it to the user's balance.
    ///
    /// Expenses are subtracted from, and income added to, the balance matching
    /// the payment method. Users without a balance row only get the transaction.
    pub fn insert_transaction(&self, user_id: &str, tx: &NewTransaction) -> Result<Transaction> {
        tx.validate()?;

        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;

        db_tx.execute(
            r#"
            INSERT INTO transactions (user_id, amount, type, category, payment_method, description, transaction_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.amount,
                tx.transaction_type.as_str(),
                tx.category.trim(),
                tx.payment_method.as_str(),
                tx.description,
                tx.transaction_date.to_string(),
            ],
        )?;
        let id = db_tx.last_insert_rowid();

        let delta = match tx.transaction_type {
            TransactionType::Expense => -tx.amount,
            TransactionType::Income => tx.amount,
        };
        let column = match tx.payment_method {
            PaymentMethod::Cash => "cash_balance",
            PaymentMethod::Account => "account_balance",
        };
        let updated = db_tx.execute(
            &format!(
                "UPDATE user_balances SET {col} = {col} + ?, updated_at = CURRENT_TIMESTAMP WHERE user_id = ?",
                col = column
            ),
            params![delta, user_id],
        )?;

        db_tx.commit()?;

        info!(
            id,
            user = user_id,
            kind = %tx.transaction_type,
            amount = tx.amount,
            balance_updated = updated > 0,
            "Recorded transaction"
        );

        self.get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// Most recent transactions for a user, newest first
    pub fn list_transactions(&self, user_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE user_id = ?
             ORDER BY transaction_date DESC, id DESC
             LIMIT ?",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![user_id, limit], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Transactions dated on or after `from`, optionally of one type only
    pub fn transactions_since(
        &self,
        user_id: &str,
        from: NaiveDate,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut sql = format!(
            "SELECT {} FROM transactions WHERE user_id = ? AND transaction_date >= ?",
            TRANSACTION_COLUMNS
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> =
            vec![Box::new(user_id.to_string()), Box::new(from.to_string())];

        if let Some(kind) = transaction_type {
            sql.push_str(" AND type = ?");
            params.push(Box::new(kind.as_str()));
        }
        sql.push_str(" ORDER BY transaction_date, id");

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let transactions = stmt
            .query_map(params_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count a user's transactions
    pub fn count_transactions(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let type_str: String = row.get(3)?;
        let method_str: String = row.get(5)?;
        let date_str: String = row.get(7)?;
        let created_at_str: String = row.get(8)?;
        let updated_at_str: String = row.get(9)?;

        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            transaction_type: type_str.parse().unwrap_or(TransactionType::Expense),
            category: row.get(4)?,
            payment_method: method_str.parse().unwrap_or(PaymentMethod::Account),
            description: row.get(6)?,
            transaction_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .unwrap_or_default(),
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
