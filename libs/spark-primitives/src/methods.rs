/// Defines all remote methods used by the backend
///
/// The generics are <I,O> where
/// - I represents the params
/// - O represents the result data
use crate::json_rpc::{NoParams, RpcMethod};
use crate::remote::*;

pub type GetInfo = RpcMethod<'static, NoParams, GetInfoResponse>;
pub type ListFunds = RpcMethod<'static, NoParams, ListFundsResponse>;
pub type ListPeers = RpcMethod<'static, NoParams, ListPeersResponse>;
pub type ListChannels = RpcMethod<'static, ListChannelsRequest, ListChannelsResponse>;
pub type ListForwards = RpcMethod<'static, NoParams, ListForwardsResponse>;
pub type ListNodes = RpcMethod<'static, ListNodesRequest, ListNodesResponse>;
pub type ListInvoices = RpcMethod<'static, NoParams, ListInvoicesResponse>;
pub type ListSendPays = RpcMethod<'static, NoParams, ListSendPaysResponse>;
pub type CreateInvoice = RpcMethod<'static, InvoiceRequest, InvoiceResponse>;
pub type Pay = RpcMethod<'static, PayRequest, PayResponse>;
pub type DecodePay = RpcMethod<'static, DecodePayRequest, DecodePayResponse>;
pub type NewAddr = RpcMethod<'static, NoParams, NewAddrResponse>;
pub type Withdraw = RpcMethod<'static, WithdrawRequest, WithdrawResponse>;
pub type Connect = RpcMethod<'static, ConnectRequest, ConnectResponse>;
pub type FundChannel = RpcMethod<'static, FundChannelRequest, FundChannelResponse>;
pub type Close = RpcMethod<'static, CloseRequest, CloseResponse>;
pub type SetChannelFee = RpcMethod<'static, SetChannelFeeRequest, SetChannelFeeResponse>;
pub type GetRoute = RpcMethod<'static, GetRouteRequest, GetRouteResponse>;

// Node
pub const GETINFO: GetInfo = GetInfo::new("getinfo");
pub const LISTNODES: ListNodes = ListNodes::new("listnodes");

// On-chain
pub const LISTFUNDS: ListFunds = ListFunds::new("listfunds");
pub const NEWADDR: NewAddr = NewAddr::new("newaddr");
pub const WITHDRAW: Withdraw = Withdraw::new("withdraw");

// Peers and channels
pub const LISTPEERS: ListPeers = ListPeers::new("listpeers");
pub const LISTCHANNELS: ListChannels = ListChannels::new("listchannels");
pub const LISTFORWARDS: ListForwards = ListForwards::new("listforwards");
pub const CONNECT: Connect = Connect::new("connect");
pub const FUNDCHANNEL: FundChannel = FundChannel::new("fundchannel");
pub const CLOSE: Close = Close::new("close");
pub const SETCHANNELFEE: SetChannelFee = SetChannelFee::new("setchannelfee");
pub const GETROUTE: GetRoute = GetRoute::new("getroute");

// Invoices and payments
pub const LISTINVOICES: ListInvoices = ListInvoices::new("listinvoices");
pub const INVOICE: CreateInvoice = CreateInvoice::new("invoice");
pub const LISTSENDPAYS: ListSendPays = ListSendPays::new("listsendpays");
pub const PAY: Pay = Pay::new("pay");
pub const DECODEPAY: DecodePay = DecodePay::new("decodepay");
