//! paybazar - PayBazaar distribution panel client
//!
//! Command-line client for the multi-tier payment distribution panel.
//! Sessions persist between invocations in a session file; every
//! protected command goes through the central session gate before it
//! touches the backend.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paybazar_core::{FileStore, HttpPanelApi, PanelConfig, SessionResolver};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// paybazar - PayBazaar distribution panel client
#[derive(Parser, Debug)]
#[command(name = "paybazar")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to panel configuration file
    #[arg(short, long, default_value = "paybazar.toml")]
    config: PathBuf,

    /// Path to the session file (overrides configuration)
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Session management ===
    /// Log in and store the session
    Login {
        /// Login email
        #[arg(long)]
        email: String,

        /// Login password
        #[arg(long)]
        password: String,

        /// Role to sign in as (master, distributor)
        #[arg(long)]
        role: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the resolved session
    #[command(alias = "whoami")]
    Session,

    // === Network management ===
    /// Create a distributor (master role)
    CreateDistributor {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Initial password
        #[arg(long)]
        password: String,

        /// Phone number (international form accepted)
        #[arg(long)]
        phone: String,
    },

    /// Create a retailer (distributor role)
    CreateRetailer {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Initial password
        #[arg(long)]
        password: String,

        /// 10-digit phone number
        #[arg(long)]
        phone: String,

        /// Shop address
        #[arg(long)]
        address: String,
    },

    // === Funds ===
    /// Submit a fund request (either role)
    RequestFund {
        /// Amount in rupees
        #[arg(long)]
        amount: String,

        /// Bank name
        #[arg(long)]
        bank_name: String,

        /// Account number
        #[arg(long)]
        account_number: String,

        /// IFSC code
        #[arg(long)]
        ifsc_code: String,

        /// Bank branch
        #[arg(long)]
        bank_branch: String,

        /// UTR number of the deposit
        #[arg(long)]
        utr_number: String,

        /// Remarks for the admin reviewing the request
        #[arg(long)]
        remarks: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = PanelConfig::load(&cli.config).context("failed to load panel configuration")?;

    let session_file = cli
        .session_file
        .clone()
        .unwrap_or_else(|| config.session_file.clone());
    let resolver = SessionResolver::new(FileStore::new(session_file));

    let api = HttpPanelApi::new(config.api_base_url.clone())
        .context("failed to initialize API client")?;

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => commands::session::login(&resolver, &api, &email, &password, &role),
        Commands::Logout => commands::session::logout(&resolver),
        Commands::Session => commands::session::show(&resolver),
        Commands::CreateDistributor {
            name,
            email,
            password,
            phone,
        } => commands::distributor::create(&resolver, &name, &email, &password, &phone),
        Commands::CreateRetailer {
            name,
            email,
            password,
            phone,
            address,
        } => commands::retailer::create(&resolver, &api, &name, &email, &password, &phone, &address),
        Commands::RequestFund {
            amount,
            bank_name,
            account_number,
            ifsc_code,
            bank_branch,
            utr_number,
            remarks,
        } => commands::fund::request(
            &resolver,
            &api,
            commands::fund::FundArgs {
                amount,
                bank_name,
                account_number,
                ifsc_code,
                bank_branch,
                utr_number,
                remarks,
            },
        ),
    }
}
