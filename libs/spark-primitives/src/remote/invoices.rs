use serde::{Deserialize, Serialize};

use crate::common_schemas::MsatAmount;

pub const INVOICE_STATUS_PAID: &str = "paid";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListInvoicesResponse {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Invoice {
    pub label: String,
    #[serde(default)]
    pub bolt11: String,
    pub payment_hash: String,
    pub status: String,
    pub expires_at: u64,
    /// Absent for invoices that accept any amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi: Option<MsatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi_received: Option<MsatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_preimage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Invoice {
    pub fn is_paid(&self) -> bool {
        self.status == INVOICE_STATUS_PAID
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceRequest {
    pub description: String,
    pub label: String,
    pub msatoshi: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<u64>,
    pub exposeprivatechannels: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvoiceResponse {
    pub bolt11: String,
    pub payment_hash: String,
    pub expires_at: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListSendPaysResponse {
    #[serde(default)]
    pub payments: Vec<SendPay>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendPay {
    pub id: u64,
    pub payment_hash: String,
    pub status: String,
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// The amount delivered to the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi: Option<MsatAmount>,
    /// The amount sent including fees
    #[serde(default)]
    pub msatoshi_sent: MsatAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_preimage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt11: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayRequest {
    pub bolt11: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msatoshi: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayResponse {
    pub payment_hash: String,
    pub payment_preimage: String,
    pub status: String,
    #[serde(default)]
    pub msatoshi: MsatAmount,
    #[serde(default)]
    pub msatoshi_sent: MsatAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// `decodepay` takes positional arguments: `[bolt11]`
#[derive(Debug, Clone, Serialize)]
#[serde(into = "Vec<String>")]
pub struct DecodePayRequest {
    pub bolt11: String,
}

impl From<DecodePayRequest> for Vec<String> {
    fn from(request: DecodePayRequest) -> Self {
        vec![request.bolt11]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecodePayResponse {
    pub payee: String,
    pub payment_hash: String,
    pub created_at: u64,
    pub expiry: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msatoshi: Option<MsatAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub min_final_cltv_expiry: u32,
}
