use spark_primitives::common_schemas::MsatAmount;
use spark_primitives::remote::{
    self, DecodePayResponse, InvoiceResponse, ListInvoicesResponse, ListSendPaysResponse,
    PayResponse, SendPay,
};
use spark_primitives::wallet::{
    CreatedInvoice, DecodedPaymentRequest, Invoice, InvoicesResponse, Payment, PaymentResult,
    PaymentsResponse,
};

pub fn invoices(response: ListInvoicesResponse) -> InvoicesResponse {
    InvoicesResponse {
        invoices: response.invoices.into_iter().map(to_invoice).collect(),
    }
}

fn to_invoice(invoice: remote::Invoice) -> Invoice {
    let settled = invoice.is_paid();
    let received = invoice.msatoshi_received.unwrap_or_default();

    // The remote node doesn't report when an invoice was created
    Invoice {
        memo: invoice.description,
        r_preimage: invoice.payment_preimage,
        r_hash: invoice.payment_hash,
        value: invoice.msatoshi.map(|m| m.to_sat()),
        value_msat: invoice.msatoshi,
        settled,
        creation_date: invoice.expires_at,
        settle_date: invoice.paid_at,
        payment_request: invoice.bolt11,
        expiry: invoice.expires_at,
        amt_paid: received.to_sat(),
        amt_paid_sat: received.to_sat(),
        amt_paid_msat: received,
    }
}

pub fn created_invoice(response: InvoiceResponse) -> CreatedInvoice {
    CreatedInvoice {
        payment_request: response.bolt11,
        r_hash: response.payment_hash,
        expires_at: response.expires_at,
    }
}

pub fn payments(response: ListSendPaysResponse) -> PaymentsResponse {
    PaymentsResponse {
        payments: response.payments.into_iter().map(to_payment).collect(),
    }
}

fn to_payment(payment: SendPay) -> Payment {
    let value_msat = payment.msatoshi.unwrap_or(payment.msatoshi_sent);
    let fee_msat = payment
        .msatoshi
        .and_then(|requested| payment.msatoshi_sent.checked_sub(&requested));

    Payment {
        payment_hash: payment.payment_hash,
        payment_preimage: payment.payment_preimage,
        status: payment.status,
        creation_date: payment.created_at,
        destination: payment.destination,
        payment_request: payment.bolt11,
        value: value_msat.to_sat(),
        value_msat,
        fee_msat,
    }
}

pub fn payment_result(response: PayResponse) -> PaymentResult {
    let fee_msat = response
        .msatoshi_sent
        .checked_sub(&response.msatoshi)
        .unwrap_or(MsatAmount::ZERO);

    PaymentResult {
        payment_hash: response.payment_hash,
        payment_preimage: response.payment_preimage,
        status: response.status,
        value_msat: response.msatoshi,
        fee_msat,
    }
}

pub fn decoded_payment_request(response: DecodePayResponse) -> DecodedPaymentRequest {
    DecodedPaymentRequest {
        destination: response.payee,
        payment_hash: response.payment_hash,
        num_satoshis: response.msatoshi.map(|m| m.to_sat()),
        num_msat: response.msatoshi,
        timestamp: response.created_at,
        expiry: response.expiry,
        description: response.description,
        cltv_expiry: response.min_final_cltv_expiry,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use spark_primitives::common_schemas::SatAmount;

    #[test]
    fn convert_paid_invoice() {
        let response: ListInvoicesResponse = serde_json::from_value(json!({
            "invoices" : [{
                "label" : "zeus.1",
                "bolt11" : "lnbc10u1",
                "payment_hash" : "ab",
                "status" : "paid",
                "expires_at" : 1700003600,
                "msatoshi" : 1_000_500,
                "msatoshi_received" : "1000900msat",
                "paid_at" : 1700000100,
                "payment_preimage" : "cd",
                "description" : "coffee"
            }]
        }))
        .unwrap();

        let invoice = &invoices(response).invoices[0];
        assert_eq!(invoice.memo.as_deref(), Some("coffee"));
        assert_eq!(invoice.r_hash, "ab");
        assert_eq!(invoice.r_preimage.as_deref(), Some("cd"));
        assert_eq!(invoice.value, Some(SatAmount::new(1000)));
        assert_eq!(invoice.value_msat, Some(MsatAmount::new(1_000_500)));
        assert!(invoice.settled);
        assert_eq!(invoice.creation_date, 1700003600);
        assert_eq!(invoice.expiry, 1700003600);
        assert_eq!(invoice.settle_date, Some(1700000100));
        assert_eq!(invoice.payment_request, "lnbc10u1");
        assert_eq!(invoice.amt_paid, SatAmount::new(1000));
        assert_eq!(invoice.amt_paid_sat, SatAmount::new(1000));
        assert_eq!(invoice.amt_paid_msat, MsatAmount::new(1_000_900));
    }

    #[test]
    fn convert_unpaid_invoice_without_amount() {
        let response: ListInvoicesResponse = serde_json::from_value(json!({
            "invoices" : [{
                "label" : "zeus.2",
                "bolt11" : "lnbc1",
                "payment_hash" : "ef",
                "status" : "unpaid",
                "expires_at" : 1700003600
            }]
        }))
        .unwrap();

        let invoice = &invoices(response).invoices[0];
        assert!(!invoice.settled);
        assert_eq!(invoice.value, None);
        assert_eq!(invoice.settle_date, None);
        assert_eq!(invoice.amt_paid_msat, MsatAmount::ZERO);
    }

    #[test]
    fn convert_payments() {
        let response: ListSendPaysResponse = serde_json::from_value(json!({
            "payments" : [
                {
                    "id" : 1,
                    "payment_hash" : "ab",
                    "status" : "complete",
                    "created_at" : 1700000000,
                    "destination" : "02aa",
                    "msatoshi" : 10_000,
                    "msatoshi_sent" : 10_042,
                    "bolt11" : "lnbc1"
                },
                {
                    "id" : 2,
                    "payment_hash" : "cd",
                    "status" : "failed",
                    "created_at" : 1700000500,
                    "msatoshi_sent" : 5_000
                }
            ]
        }))
        .unwrap();

        let payments = payments(response).payments;
        assert_eq!(payments[0].value, SatAmount::new(10));
        assert_eq!(payments[0].value_msat, MsatAmount::new(10_000));
        assert_eq!(payments[0].fee_msat, Some(MsatAmount::new(42)));
        assert_eq!(payments[0].creation_date, 1700000000);
        assert_eq!(payments[0].payment_request.as_deref(), Some("lnbc1"));

        assert_eq!(payments[1].value_msat, MsatAmount::new(5_000));
        assert_eq!(payments[1].fee_msat, None);
    }

    #[test]
    fn payment_result_reports_fee() {
        let response: PayResponse = serde_json::from_value(json!({
            "payment_hash" : "ab",
            "payment_preimage" : "cd",
            "status" : "complete",
            "msatoshi" : "100000msat",
            "msatoshi_sent" : "100101msat"
        }))
        .unwrap();

        let result = payment_result(response);
        assert_eq!(result.value_msat, MsatAmount::new(100_000));
        assert_eq!(result.fee_msat, MsatAmount::new(101));
    }

    #[test]
    fn decode_amountless_payment_request() {
        let response: DecodePayResponse = serde_json::from_value(json!({
            "payee" : "02aa",
            "payment_hash" : "ab",
            "created_at" : 1700000000,
            "expiry" : 3600,
            "description" : "donation",
            "min_final_cltv_expiry" : 18
        }))
        .unwrap();

        let decoded = decoded_payment_request(response);
        assert_eq!(decoded.destination, "02aa");
        assert_eq!(decoded.num_satoshis, None);
        assert_eq!(decoded.timestamp, 1700000000);
        assert_eq!(decoded.cltv_expiry, 18);
    }
}
