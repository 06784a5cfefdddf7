use crate::domain::amount::Amount;
use serde::{Deserialize, Serialize};

/// Banking details of a transfer target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub bank_code: String,
    pub branch_code: String,
    pub account_number: String,
    pub account_type: String,
    pub tax_id: String,
    pub name: String,
}

impl Recipient {
    /// The fixed account every webhook transfer is sent to.
    pub fn stark_bank() -> Self {
        Self {
            bank_code: "20018183".to_string(),
            branch_code: "0001".to_string(),
            account_number: "6341320293482496".to_string(),
            account_type: "payment".to_string(),
            tax_id: "20.018.183/0001-80".to_string(),
            name: "Stark Bank S.A.".to_string(),
        }
    }
}

impl Default for Recipient {
    fn default() -> Self {
        Self::stark_bank()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub amount: Amount,
    #[serde(flatten)]
    pub recipient: Recipient,
}

impl TransferRequest {
    pub fn new(amount: Amount, recipient: Recipient) -> Self {
        Self { amount, recipient }
    }
}

/// A transfer as acknowledged by the payment API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}
