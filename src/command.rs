use std::env;

use clap::{Parser, Subcommand};
use cooler_deployer_calculator::{
    error::{PRIVATE_KEY_ENV, SEED_PHRASE_ENV},
    keypair::KeyConfig,
    re_exports::eyre,
};

use crate::handle::{deploy_package, show_address};

pub const DEFAULT_GAS_BUDGET: u64 = 500_000_000;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Sui network, options are `mainnet`, `testnet`, `devnet`, `localnet` or URL (e.g. http://127.0.0.1:9000)
    #[arg(short, long, default_value_t = String::from("testnet"))]
    network: String,

    /// Which secret signs the transaction, `seed` reads SEED_PHRASE and `private-key` reads PRIVATE_KEY_USER_1
    #[arg(long, default_value_t = String::from("seed"))]
    key_source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the Move package, publish it and write the deployment manifest
    Publish {
        /// Directory of the Move package sources
        #[arg(long, default_value_t = String::from("sources"))]
        contract_path: String,
        /// Directory the manifest and the raw object changes are written to
        #[arg(long, default_value_t = String::from("."))]
        deployment_path: String,
        /// Sui CLI used to compile the package
        #[arg(long, default_value_t = String::from("sui"))]
        sui_bin: String,
        /// Upper bound of the publish fee in MIST
        #[arg(long, default_value_t = DEFAULT_GAS_BUDGET)]
        gas_budget: u64,
    },
    /// Print the address of the signing identity
    Address,
}

/// Secrets are only taken from environment (or `.env`), never from the command line
fn key_config_from_env() -> KeyConfig {
    KeyConfig {
        seed_phrase: env::var(SEED_PHRASE_ENV).ok(),
        private_key: env::var(PRIVATE_KEY_ENV).ok(),
    }
}

/// Parse and dispatch commands
pub async fn dispatch_commands() -> eyre::Result<()> {
    let cli = Cli::parse();
    let key_source = cli.key_source.parse()?;
    let keys = key_config_from_env();
    match cli.command {
        Commands::Publish {
            contract_path,
            deployment_path,
            sui_bin,
            gas_budget,
        } => {
            deploy_package(
                cli.network,
                key_source,
                keys,
                contract_path,
                deployment_path,
                sui_bin,
                gas_budget,
            )
            .await
        }
        Commands::Address => show_address(key_source, keys),
    }
}
