use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;

use spark_primitives::common_schemas::MsatAmount;
use spark_primitives::json_rpc::{NoParams, RangeDirective};
use spark_primitives::methods;
use spark_primitives::remote::{
    CloseRequest, ConnectRequest, DecodePayRequest, FundChannelRequest, GetRouteRequest,
    InvoiceRequest, ListChannelsRequest, ListFundsResponse, ListNodesRequest, ListPeersResponse,
    PayRequest, SetChannelFeeRequest, WithdrawRequest,
};
use spark_primitives::wallet::*;

use crate::backend::NodeBackend;
use crate::dispatcher::Dispatcher;
use crate::normalize;
use crate::settings::SettingsProvider;
use crate::transport::HttpTransport;

const INVOICE_LABEL_PREFIX: &str = "zeus";
const INVOICE_LABEL_RANGE: u32 = 1_000_000;
/// Invoices and payments are listed up to this count
const RECENT_ITEMS: u32 = 100;
const ROUTE_RISK_FACTOR: u32 = 2;
/// Seconds to wait for a cooperative close before closing unilaterally
const FORCE_CLOSE_TIMEOUT: u32 = 60;

/// A [`NodeBackend`] for Core Lightning nodes that run a Spark wallet server
#[derive(Clone)]
pub struct SparkBackend {
    dispatcher: Dispatcher,
}

impl SparkBackend {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Connects over HTTP(S) using the provided settings
    pub fn connect(settings: Arc<dyn SettingsProvider>) -> Result<Self> {
        let transport = HttpTransport::new()?;
        Ok(Self::new(Dispatcher::new(Arc::new(transport), settings)))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    async fn list_funds(&self) -> Result<ListFundsResponse> {
        Ok(self
            .dispatcher
            .call(methods::LISTFUNDS, &NoParams, None)
            .await?)
    }

    async fn list_peers(&self) -> Result<ListPeersResponse> {
        Ok(self
            .dispatcher
            .call(methods::LISTPEERS, &NoParams, None)
            .await?)
    }
}

fn invoice_label() -> String {
    let nonce = rand::thread_rng().gen_range(0..INVOICE_LABEL_RANGE);
    format!("{}.{}", INVOICE_LABEL_PREFIX, nonce)
}

#[async_trait]
impl NodeBackend for SparkBackend {
    async fn get_transactions(&self) -> Result<TransactionsResponse> {
        let funds = self
            .list_funds()
            .await
            .context("Failed to list transactions")?;
        Ok(normalize::funds::transactions(funds))
    }

    async fn get_channels(&self) -> Result<ChannelsResponse> {
        let peers = self.list_peers().await.context("Failed to list channels")?;
        normalize::channels::channels(&peers)
    }

    async fn get_blockchain_balance(&self) -> Result<BlockchainBalance> {
        let funds = self
            .list_funds()
            .await
            .context("Failed to get on-chain balance")?;
        normalize::funds::blockchain_balance(&funds)
    }

    async fn get_lightning_balance(&self) -> Result<LightningBalance> {
        let funds = self
            .list_funds()
            .await
            .context("Failed to get lightning balance")?;
        normalize::funds::lightning_balance(&funds)
    }

    async fn send_coins(&self, request: &SendCoinsRequest) -> Result<SentCoins> {
        let params = WithdrawRequest {
            destination: request.addr.clone(),
            satoshi: request.amount.sat_value(),
            feerate: request.sat_per_byte.to_perkb_string(),
        };

        let response = self
            .dispatcher
            .call(methods::WITHDRAW, &params, None)
            .await
            .with_context(|| format!("Failed to send {} to {}", request.amount, request.addr))?;
        Ok(normalize::funds::sent_coins(response))
    }

    async fn get_my_node_info(&self) -> Result<MyNodeInfo> {
        let info = self
            .dispatcher
            .call(methods::GETINFO, &NoParams, None)
            .await
            .context("Failed to get node info")?;
        Ok(normalize::nodes::my_node_info(info))
    }

    async fn get_invoices(&self) -> Result<InvoicesResponse> {
        let range = RangeDirective::last("invoices", RECENT_ITEMS);
        let response = self
            .dispatcher
            .call(methods::LISTINVOICES, &NoParams, Some(range))
            .await
            .context("Failed to list invoices")?;
        Ok(normalize::invoices::invoices(response))
    }

    async fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<CreatedInvoice> {
        let msatoshi = request
            .value
            .to_msat()
            .with_context(|| format!("Invoice amount too large: {}", request.value))?;
        let params = InvoiceRequest {
            description: request.memo.clone(),
            label: invoice_label(),
            msatoshi: msatoshi.msat_value(),
            expiry: request.expiry,
            exposeprivatechannels: true,
        };

        let response = self
            .dispatcher
            .call(methods::INVOICE, &params, None)
            .await
            .context("Failed to create invoice")?;
        Ok(normalize::invoices::created_invoice(response))
    }

    async fn get_payments(&self) -> Result<PaymentsResponse> {
        let range = RangeDirective::last("payments", RECENT_ITEMS);
        let response = self
            .dispatcher
            .call(methods::LISTSENDPAYS, &NoParams, Some(range))
            .await
            .context("Failed to list payments")?;
        Ok(normalize::invoices::payments(response))
    }

    async fn get_new_address(&self) -> Result<NewAddress> {
        let response = self
            .dispatcher
            .call(methods::NEWADDR, &NoParams, None)
            .await
            .context("Failed to create a new address")?;
        Ok(normalize::funds::new_address(response))
    }

    async fn open_channel(&self, request: &OpenChannelRequest) -> Result<OpenedChannel> {
        let params = FundChannelRequest {
            id: request.node_pubkey_string,
            amount: request.satoshis.sat_value(),
            feerate: request.sat_per_byte.to_perkb_string(),
            announce: !request.private,
        };

        let response = self
            .dispatcher
            .call(methods::FUNDCHANNEL, &params, None)
            .await
            .with_context(|| format!("Failed to open channel to {}", request.node_pubkey_string))?;
        Ok(normalize::channels::opened_channel(response))
    }

    async fn connect_peer(&self, request: &ConnectPeerRequest) -> Result<ConnectedPeer> {
        let params = ConnectRequest {
            id: request.addr.pubkey,
            host: request.addr.host.clone(),
        };

        let response = self
            .dispatcher
            .call(methods::CONNECT, &params, None)
            .await
            .with_context(|| format!("Failed to connect to {}", request.addr.pubkey))?;
        Ok(normalize::channels::connected_peer(response))
    }

    async fn decode_payment_request(
        &self,
        request: &DecodePaymentRequest,
    ) -> Result<DecodedPaymentRequest> {
        let params = DecodePayRequest {
            bolt11: request.payment_request.clone(),
        };

        let response = self
            .dispatcher
            .call(methods::DECODEPAY, &params, None)
            .await
            .context("Failed to decode payment request")?;
        Ok(normalize::invoices::decoded_payment_request(response))
    }

    async fn pay_lightning_invoice(&self, request: &PayInvoiceRequest) -> Result<PaymentResult> {
        let msatoshi = match request.amt {
            Some(amt) => Some(
                amt.to_msat()
                    .with_context(|| format!("Payment amount too large: {}", amt))?
                    .msat_value(),
            ),
            None => None,
        };
        let params = PayRequest {
            bolt11: request.payment_request.clone(),
            msatoshi,
        };

        let response = self
            .dispatcher
            .call(methods::PAY, &params, None)
            .await
            .context("Failed to pay invoice")?;
        Ok(normalize::invoices::payment_result(response))
    }

    async fn close_channel(&self, request: &CloseChannelRequest) -> Result<CloseChannelResponse> {
        let params = CloseRequest {
            id: request.channel_id.clone(),
            unilateraltimeout: if request.force { FORCE_CLOSE_TIMEOUT } else { 0 },
        };

        let response = self
            .dispatcher
            .call(methods::CLOSE, &params, None)
            .await
            .with_context(|| format!("Failed to close channel {}", request.channel_id))?;
        log::debug!(
            "Closed channel {} ({})",
            request.channel_id,
            response.close_type
        );
        Ok(CloseChannelResponse::success())
    }

    async fn get_node_info(&self, request: &NodeInfoRequest) -> Result<NodeInfoResponse> {
        let params = ListNodesRequest { id: request.pubkey };

        let response = self
            .dispatcher
            .call(methods::LISTNODES, &params, None)
            .await
            .with_context(|| format!("Failed to look up node {}", request.pubkey))?;
        Ok(normalize::nodes::node_info(response))
    }

    async fn get_fees(&self) -> Result<FeeSummary> {
        let (info, forwards, peers) = futures::try_join!(
            self.dispatcher.call(methods::GETINFO, &NoParams, None),
            self.dispatcher.call(methods::LISTFORWARDS, &NoParams, None),
            self.dispatcher.call(methods::LISTPEERS, &NoParams, None),
        )
        .context("Failed to get fee report")?;

        let params = ListChannelsRequest {
            source: Some(info.id.clone()),
        };
        let policies = self
            .dispatcher
            .call(methods::LISTCHANNELS, &params, None)
            .await
            .context("Failed to get channel fee policies")?;

        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        normalize::fees::fee_summary(&info, &forwards.forwards, &peers, &policies, now)
    }

    async fn set_fees(&self, request: &SetFeesRequest) -> Result<FeeUpdate> {
        let params = SetChannelFeeRequest {
            id: request.target()?,
            base: request.base_fee_msat.msat_value(),
            ppm: request.fee_rate_ppm()?,
        };

        let response = self
            .dispatcher
            .call(methods::SETCHANNELFEE, &params, None)
            .await
            .with_context(|| format!("Failed to set fees for {}", params.id))?;
        Ok(normalize::fees::fee_update(response))
    }

    async fn get_routes(&self, request: &RouteRequest) -> Result<RoutesResponse> {
        let requested: MsatAmount = request
            .amount
            .to_msat()
            .with_context(|| format!("Amount too large: {}", request.amount))?;
        let params = GetRouteRequest {
            id: request.pubkey,
            msatoshi: requested.msat_value(),
            riskfactor: ROUTE_RISK_FACTOR,
        };

        let response = self
            .dispatcher
            .call(methods::GETROUTE, &params, None)
            .await
            .with_context(|| format!("Failed to find a route to {}", request.pubkey))?;
        normalize::routes::routes(&response, requested)
    }

    fn supports_onchain_sends(&self) -> bool {
        true
    }

    fn supports_keysend(&self) -> bool {
        false
    }

    fn supports_channel_management(&self) -> bool {
        true
    }

    fn supports_custom_host_protocol(&self) -> bool {
        false
    }

    fn supports_mpp(&self) -> bool {
        false
    }
}
