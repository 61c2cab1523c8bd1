use anyhow::{Context, Result};

use spark_primitives::common_schemas::SatAmount;
use spark_primitives::remote::{
    FundOutput, ListFundsResponse, NewAddrResponse, WithdrawResponse, CHANNEL_STATE_AWAITING_LOCKIN,
    CHANNEL_STATE_NORMAL,
};
use spark_primitives::wallet::{
    BlockchainBalance, LightningBalance, NewAddress, SentCoins, TransactionsResponse,
};

/// The outputs are passed on as they are
pub fn transactions(funds: ListFundsResponse) -> TransactionsResponse {
    TransactionsResponse {
        transactions: funds.outputs,
    }
}

fn sum_outputs<'a>(outputs: impl Iterator<Item = &'a FundOutput>) -> Result<SatAmount> {
    SatAmount::checked_sum(outputs.map(|o| o.value_sat())).context("On-chain balance overflows")
}

pub fn blockchain_balance(funds: &ListFundsResponse) -> Result<BlockchainBalance> {
    let confirmed_balance = sum_outputs(funds.outputs.iter().filter(|o| o.is_confirmed()))?;
    let unconfirmed_balance = sum_outputs(funds.outputs.iter().filter(|o| !o.is_confirmed()))?;
    let total_balance = confirmed_balance
        .checked_add(&unconfirmed_balance)
        .context("On-chain balance overflows")?;

    Ok(BlockchainBalance {
        total_balance,
        confirmed_balance,
        unconfirmed_balance,
    })
}

/// Channels that are neither open nor being opened are ignored
pub fn lightning_balance(funds: &ListFundsResponse) -> Result<LightningBalance> {
    let in_state = |state: &'static str| {
        SatAmount::checked_sum(
            funds
                .channels
                .iter()
                .filter(move |c| c.state == state)
                .map(|c| c.channel_sat),
        )
        .context("Lightning balance overflows")
    };

    Ok(LightningBalance {
        balance: in_state(CHANNEL_STATE_NORMAL)?,
        pending_open_balance: in_state(CHANNEL_STATE_AWAITING_LOCKIN)?,
    })
}

pub fn sent_coins(response: WithdrawResponse) -> SentCoins {
    SentCoins {
        txid: response.txid,
        tx: response.tx,
    }
}

pub fn new_address(response: NewAddrResponse) -> NewAddress {
    NewAddress {
        address: response.address,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn funds() -> ListFundsResponse {
        serde_json::from_value(json!({
            "outputs" : [
                {"txid" : "aa", "output" : 0, "value" : 100, "status" : "confirmed", "address" : "bc1qa"},
                {"txid" : "bb", "output" : 1, "value" : 50, "status" : "unconfirmed"}
            ],
            "channels" : [
                {"peer_id" : "02aa", "state" : "CHANNELD_NORMAL", "channel_sat" : 1000},
                {"peer_id" : "02bb", "state" : "CHANNELD_NORMAL", "channel_sat" : 500},
                {"peer_id" : "02cc", "state" : "CHANNELD_AWAITING_LOCKIN", "channel_sat" : 300},
                {"peer_id" : "02dd", "state" : "ONCHAIN", "channel_sat" : 9000}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn partition_outputs_by_status() {
        let balance = blockchain_balance(&funds()).unwrap();
        assert_eq!(
            balance,
            BlockchainBalance {
                total_balance: SatAmount::new(150),
                confirmed_balance: SatAmount::new(100),
                unconfirmed_balance: SatAmount::new(50),
            }
        );
    }

    #[test]
    fn empty_funds_have_zero_balance() {
        let funds: ListFundsResponse = serde_json::from_value(json!({})).unwrap();
        let balance = blockchain_balance(&funds).unwrap();
        assert_eq!(balance.total_balance, SatAmount::ZERO);

        let balance = lightning_balance(&funds).unwrap();
        assert_eq!(balance.balance, SatAmount::ZERO);
        assert_eq!(balance.pending_open_balance, SatAmount::ZERO);
    }

    #[test]
    fn lightning_balance_by_channel_state() {
        let balance = lightning_balance(&funds()).unwrap();
        assert_eq!(balance.balance, SatAmount::new(1500));
        assert_eq!(balance.pending_open_balance, SatAmount::new(300));
    }

    #[test]
    fn transactions_keep_unknown_fields() {
        let transactions = transactions(funds());
        let value = serde_json::to_value(&transactions).unwrap();

        assert_eq!(value["transactions"][0]["address"], "bc1qa");
        assert_eq!(value["transactions"][1]["value"], 50);
    }
}
