//! `einvoice` command-line front end.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use einvoice_client::ClientConfig;
use einvoice_invoicing::InvoiceType;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "einvoice")]
#[command(about = "Create, validate and submit e-invoices", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Invoice service base URL (can also be set via EINVOICE_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a blank draft with a freshly generated invoice number
    New {
        /// Invoice type (standard or proforma)
        #[arg(short = 't', long = "type", default_value = "standard")]
        invoice_type: InvoiceType,

        /// Seller tax ID to prefill
        #[arg(long)]
        seller: Option<String>,

        /// Write the draft to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show line and invoice totals for a draft
    Totals {
        /// Draft JSON file (`-` for stdin)
        file: PathBuf,
    },

    /// Print the XML document for a draft
    Render {
        /// Draft JSON file (`-` for stdin)
        file: PathBuf,

        /// Issue date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Validate a draft and submit it to the invoice service
    Submit {
        /// Draft JSON file (`-` for stdin)
        file: PathBuf,

        /// Also print the generated XML document
        #[arg(long)]
        show_document: bool,
    },

    /// List invoices stored by the service
    List,

    /// Show one invoice and a QR code of its id
    Show {
        /// Invoice id (UUID)
        id: String,
    },
}

fn client_config(api_url: Option<String>) -> ClientConfig {
    let from_env = ClientConfig::from_env();
    match api_url {
        Some(url) => {
            let config = ClientConfig::new(url);
            match from_env.timeout() {
                Some(timeout) => config.with_timeout(timeout),
                None => config,
            }
        }
        None => from_env,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    einvoice_observability::init();

    match cli.command {
        Commands::New {
            invoice_type,
            seller,
            output,
        } => commands::new::run(invoice_type, seller, output.as_deref())?,
        Commands::Totals { file } => commands::totals::run(&file)?,
        Commands::Render { file, date } => commands::render::run(&file, date)?,
        Commands::Submit {
            file,
            show_document,
        } => commands::submit::run(client_config(cli.api_url), &file, show_document).await?,
        Commands::List => commands::list::run(client_config(cli.api_url)).await?,
        Commands::Show { id } => commands::show::run(client_config(cli.api_url), &id).await?,
    }

    Ok(())
}
