use anyhow::Result;
use async_trait::async_trait;

use spark_primitives::wallet::*;

/// The operations a wallet needs from its Lightning node.
///
/// Every operation returns a canonical record that doesn't depend on the
/// node implementation. Errors returned by the node are reported as
/// [`crate::DispatchError`] and can be recovered using `downcast_ref`.
///
/// Not every backend supports every feature. The wallet queries the
/// `supports_*`-methods before offering a feature to the user.
#[async_trait]
pub trait NodeBackend: Send + Sync {
    /// All on-chain outputs known to the node
    async fn get_transactions(&self) -> Result<TransactionsResponse>;

    /// One channel per peer
    async fn get_channels(&self) -> Result<ChannelsResponse>;

    async fn get_blockchain_balance(&self) -> Result<BlockchainBalance>;

    async fn get_lightning_balance(&self) -> Result<LightningBalance>;

    async fn send_coins(&self, request: &SendCoinsRequest) -> Result<SentCoins>;

    async fn get_my_node_info(&self) -> Result<MyNodeInfo>;

    /// The most recent invoices
    async fn get_invoices(&self) -> Result<InvoicesResponse>;

    async fn create_invoice(&self, request: &CreateInvoiceRequest) -> Result<CreatedInvoice>;

    /// The most recent outgoing payments
    async fn get_payments(&self) -> Result<PaymentsResponse>;

    async fn get_new_address(&self) -> Result<NewAddress>;

    async fn open_channel(&self, request: &OpenChannelRequest) -> Result<OpenedChannel>;

    async fn connect_peer(&self, request: &ConnectPeerRequest) -> Result<ConnectedPeer>;

    async fn decode_payment_request(
        &self,
        request: &DecodePaymentRequest,
    ) -> Result<DecodedPaymentRequest>;

    async fn pay_lightning_invoice(&self, request: &PayInvoiceRequest) -> Result<PaymentResult>;

    async fn close_channel(&self, request: &CloseChannelRequest) -> Result<CloseChannelResponse>;

    async fn get_node_info(&self, request: &NodeInfoRequest) -> Result<NodeInfoResponse>;

    /// Fee policies of our channels and the fees earned by forwarding
    async fn get_fees(&self) -> Result<FeeSummary>;

    async fn set_fees(&self, request: &SetFeesRequest) -> Result<FeeUpdate>;

    async fn get_routes(&self, request: &RouteRequest) -> Result<RoutesResponse>;

    fn supports_onchain_sends(&self) -> bool;
    fn supports_keysend(&self) -> bool;
    fn supports_channel_management(&self) -> bool;
    fn supports_custom_host_protocol(&self) -> bool;
    fn supports_mpp(&self) -> bool;
}
