use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;

use crate::config;
use crate::database::Database;
use crate::services::payments;

#[derive(Parser)]
#[command(name = "loadboardctl")]
#[command(about = "Loadboard admin CLI - operational tasks against the marketplace database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check database connectivity")]
    Health,

    #[command(about = "Void all payments for a shipment and reset it to PENDING (idempotent)")]
    VoidPayment {
        #[arg(long, help = "Shipment id whose payments should be voided")]
        shipment: Uuid,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::config();
    let db = Database::connect(&config.database)?;

    let result = match &cli.command {
        Commands::Health => {
            db.health_check().await?;
            json!({ "status": "ok" })
        }
        Commands::VoidPayment { shipment } => {
            match payments::void_for_shipment(db.pool(), *shipment).await? {
                Some(outcome) => serde_json::to_value(&outcome)?,
                None => {
                    db.close().await;
                    anyhow::bail!("shipment {} not found", shipment);
                }
            }
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_text(&result);
    }

    db.close().await;
    Ok(())
}

fn print_text(value: &serde_json::Value) {
    match value.as_object() {
        Some(map) => {
            for (k, v) in map {
                println!("{}: {}", k, v);
            }
        }
        None => println!("{}", value),
    }
}
