//! Credit Ledger Models

use jiff::Timestamp;

use crate::{domain::customers::models::CustomerUuid, uuids::TypedUuid};

/// Credit Transaction UUID
pub type TransactionUuid = TypedUuid<CreditTransaction>;

/// Ledger entry categories, mirroring the `transaction_type` enum in
/// PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "snake_case")]
pub enum TransactionType {
    Purchase,
    Usage,
    SubscriptionRenew,
    ManualAdjustment,
    Bonus,
}

impl TransactionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Usage => "usage",
            Self::SubscriptionRenew => "subscription_renew",
            Self::ManualAdjustment => "manual_adjustment",
            Self::Bonus => "bonus",
        }
    }
}

/// One append-only ledger entry. `amount` is positive for grants and negative
/// for usage; the running balance is the sum of a customer's entries.
#[derive(Debug, Clone)]
pub struct CreditTransaction {
    pub uuid: TransactionUuid,
    pub customer_uuid: CustomerUuid,
    pub amount: i32,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
