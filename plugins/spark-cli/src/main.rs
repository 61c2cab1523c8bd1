use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use serde_json::{json, Value};

use spark_primitives::common_schemas::{FeeRate, MsatAmount, PublicKey, SatAmount};
use spark_primitives::wallet::*;

use cln_spark::transport::HttpTransport;
use cln_spark::{Dispatcher, NodeBackend, Settings, SharedSettings, SparkBackend};

#[derive(Parser, Debug)]
#[command(
    name = "spark-cli",
    about = "Talk to a Core Lightning node through its Spark wallet server"
)]
struct Cli {
    /// Base url of the Spark server. `/rpc` is appended if missing
    #[arg(long, env = "SPARK_URL")]
    url: String,

    #[arg(long, env = "SPARK_ACCESS_KEY", hide_env_values = true)]
    access_key: String,

    /// Set to false for servers with a self-signed certificate
    #[arg(long, env = "SPARK_CERT_VERIFICATION", default_value_t = true, action = ArgAction::Set)]
    cert_verification: bool,

    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    Transactions,
    Channels,
    BlockchainBalance,
    LightningBalance,
    Info,
    Invoices,
    Payments,
    NewAddress,
    Fees,
    Capabilities,
    SendCoins {
        addr: String,
        amount: u64,
        /// Fee rate in sat/vB. Fractions are allowed
        #[arg(long, default_value = "1")]
        sat_per_byte: FeeRate,
    },
    CreateInvoice {
        value: u64,
        #[arg(long, default_value = "")]
        memo: String,
        #[arg(long)]
        expiry: Option<u64>,
    },
    OpenChannel {
        pubkey: PublicKey,
        satoshis: u64,
        /// Fee rate in sat/vB. Fractions are allowed
        #[arg(long, default_value = "1")]
        sat_per_byte: FeeRate,
        #[arg(long, default_value_t = false)]
        private: bool,
    },
    Connect {
        pubkey: PublicKey,
        host: String,
    },
    SetFees {
        base_fee_msat: u64,
        /// Proportional fee. E.g. 0.000001 equals 1 ppm
        fee_rate: f64,
        #[arg(long)]
        channel_id: Option<String>,
        #[arg(long, default_value_t = false)]
        global: bool,
    },
    Pay {
        payment_request: String,
        /// Only required for invoices without an amount
        #[arg(long)]
        amt: Option<u64>,
    },
    /// <payment_request>
    Decode { params: Vec<String> },
    /// <channel_id> [force]
    CloseChannel { params: Vec<String> },
    /// <pubkey>
    LookupNode { params: Vec<String> },
    /// <pubkey> <amount>
    Routes { params: Vec<String> },
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

async fn execute(backend: &impl NodeBackend, command: Command) -> Result<Value> {
    match command {
        Command::Transactions => to_json(backend.get_transactions().await?),
        Command::Channels => to_json(backend.get_channels().await?),
        Command::BlockchainBalance => to_json(backend.get_blockchain_balance().await?),
        Command::LightningBalance => to_json(backend.get_lightning_balance().await?),
        Command::Info => to_json(backend.get_my_node_info().await?),
        Command::Invoices => to_json(backend.get_invoices().await?),
        Command::Payments => to_json(backend.get_payments().await?),
        Command::NewAddress => to_json(backend.get_new_address().await?),
        Command::Fees => to_json(backend.get_fees().await?),
        Command::Capabilities => Ok(json!({
            "onchain_sends" : backend.supports_onchain_sends(),
            "keysend" : backend.supports_keysend(),
            "channel_management" : backend.supports_channel_management(),
            "custom_host_protocol" : backend.supports_custom_host_protocol(),
            "mpp" : backend.supports_mpp(),
        })),
        Command::SendCoins {
            addr,
            amount,
            sat_per_byte,
        } => {
            let request = SendCoinsRequest {
                addr,
                amount: SatAmount::new(amount),
                sat_per_byte,
            };
            to_json(backend.send_coins(&request).await?)
        }
        Command::CreateInvoice {
            value,
            memo,
            expiry,
        } => {
            let request = CreateInvoiceRequest {
                memo,
                value: SatAmount::new(value),
                expiry,
            };
            to_json(backend.create_invoice(&request).await?)
        }
        Command::OpenChannel {
            pubkey,
            satoshis,
            sat_per_byte,
            private,
        } => {
            let request = OpenChannelRequest {
                node_pubkey_string: pubkey,
                satoshis: SatAmount::new(satoshis),
                sat_per_byte,
                private,
            };
            to_json(backend.open_channel(&request).await?)
        }
        Command::Connect { pubkey, host } => {
            let request = ConnectPeerRequest {
                addr: PeerAddress { pubkey, host },
            };
            to_json(backend.connect_peer(&request).await?)
        }
        Command::SetFees {
            base_fee_msat,
            fee_rate,
            channel_id,
            global,
        } => {
            let request = SetFeesRequest {
                global,
                channel_id,
                base_fee_msat: MsatAmount::new(base_fee_msat),
                fee_rate,
            };
            to_json(backend.set_fees(&request).await?)
        }
        Command::Pay {
            payment_request,
            amt,
        } => {
            let request = PayInvoiceRequest {
                payment_request,
                amt: amt.map(SatAmount::new),
            };
            to_json(backend.pay_lightning_invoice(&request).await?)
        }
        Command::Decode { params } => {
            let request = DecodePaymentRequest::from_url_params(&params)?;
            to_json(backend.decode_payment_request(&request).await?)
        }
        Command::CloseChannel { params } => {
            let request = CloseChannelRequest::from_url_params(&params)?;
            to_json(backend.close_channel(&request).await?)
        }
        Command::LookupNode { params } => {
            let request = NodeInfoRequest::from_url_params(&params)?;
            to_json(backend.get_node_info(&request).await?)
        }
        Command::Routes { params } => {
            let request = RouteRequest::from_url_params(&params)?;
            to_json(backend.get_routes(&request).await?)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::new(cli.url, cli.access_key)
        .with_cert_verification(cli.cert_verification);
    if !settings.cert_verification {
        log::warn!("TLS-certificate verification is disabled");
    }

    let transport = HttpTransport::with_timeout(cli.timeout_secs.map(Duration::from_secs))?;
    let dispatcher = Dispatcher::new(Arc::new(transport), Arc::new(SharedSettings::new(settings)));
    let backend = SparkBackend::new(dispatcher);

    let output = execute(&backend, cli.command).await?;
    let output = serde_json::to_string_pretty(&output).context("Failed to format output")?;
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::info!("Using Spark server at {}", cli.url);
    run(cli).await
}
