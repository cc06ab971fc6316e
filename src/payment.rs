//! Payment records
//!
//! Checkout creates a pending record before the gateway is contacted; the
//! gateway later reports success or failure. Gateway integration is not part
//! of this crate, the default gateway is the mock one.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::utils::time::now_utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentGateway {
    Stripe,
    Razorpay,
    #[default]
    Mock,
}

/// What is being paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentPurpose {
    Course,
    Session,
}

/// Checkout request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentParams {
    #[validate(length(min = 1, message = "You must be logged in to make a payment"))]
    pub user_id: String,

    pub purpose: PaymentPurpose,

    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than zero"))]
    pub amount: f64,

    #[validate(length(equal = 3, message = "Currency must be a three-letter code"))]
    pub currency: String,

    #[serde(default)]
    pub gateway: Option<PaymentGateway>,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A stored payment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub user_id: String,
    pub purpose: PaymentPurpose,
    pub amount: f64,
    pub currency: String,
    pub gateway: PaymentGateway,
    pub metadata: Map<String, Value>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Storage for payment records
#[cfg_attr(test, mockall::automock)]
pub trait PaymentLedger: Send + Sync {
    /// Store a new pending record and return its id
    fn create(&self, params: CreatePaymentParams) -> AppResult<Uuid>;

    fn update_status(&self, id: Uuid, status: PaymentStatus) -> AppResult<()>;

    fn get(&self, id: Uuid) -> Option<PaymentRecord>;
}

/// Validate a checkout request and open a pending record for it.
pub fn begin_payment<L>(ledger: &L, params: CreatePaymentParams) -> AppResult<Uuid>
where
    L: PaymentLedger + ?Sized,
{
    params.validate()?;
    ledger.create(params)
}

/// Process-local ledger
#[derive(Debug, Default)]
pub struct InMemoryPaymentLedger {
    records: DashMap<Uuid, PaymentRecord>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PaymentLedger for InMemoryPaymentLedger {
    fn create(&self, params: CreatePaymentParams) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        let record = PaymentRecord {
            id,
            user_id: params.user_id,
            purpose: params.purpose,
            amount: params.amount,
            currency: params.currency,
            gateway: params.gateway.unwrap_or_default(),
            metadata: params.metadata,
            status: PaymentStatus::Pending,
            created_at: now_utc(),
            updated_at: None,
        };

        tracing::info!(payment_id = %id, gateway = ?record.gateway, "Payment record created");
        self.records.insert(id, record);
        Ok(id)
    }

    fn update_status(&self, id: Uuid, status: PaymentStatus) -> AppResult<()> {
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("payment {}", id)))?;

        record.status = status;
        record.updated_at = Some(now_utc());
        tracing::info!(payment_id = %id, status = ?status, "Payment status updated");
        Ok(())
    }

    fn get(&self, id: Uuid) -> Option<PaymentRecord> {
        self.records.get(&id).map(|r| r.clone())
    }
}
