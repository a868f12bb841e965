use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use places::StaticPlaceSource;
use shared::{
    display::{filter_display, maps_search_url},
    domain::{Filter, Place, PropertyInfo},
};
use tracing_subscriber::EnvFilter;
use view_state::ViewController;

#[derive(Parser, Debug)]
#[command(name = "tools", about = "Nearby places from the terminal")]
struct Cli {
    #[arg(long, global = true, default_value_t = 1000, help = "Simulated fetch latency")]
    latency_ms: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the nearby places and print the ones matching the filter.
    List {
        #[arg(long, default_value = "all")]
        filter: String,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Print the property details.
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List { filter, json } => {
            let source = StaticPlaceSource::new(Duration::from_millis(cli.latency_ms));
            let view = ViewController::mount(Arc::new(source));
            view.set_filter(Filter::from(filter));
            view.wait_loaded().await;

            let places = view.filtered_places();
            if json {
                println!("{}", serde_json::to_string_pretty(&places)?);
            } else {
                print_places(&view.active_filter(), &places);
            }
        }
        Command::Info => {
            let info = PropertyInfo::default();
            println!("{}", info.address);
            println!("{}", info.phone);
            println!("{}", info.schedule_line());
            println!("{}", info.wifi_line());
        }
    }

    Ok(())
}

fn print_places(filter: &Filter, places: &[Place]) {
    let heading = filter_display(filter)
        .map(|display| format!("{} {}", display.icon, display.label))
        .unwrap_or_else(|| filter.to_string());
    println!("{heading} ({})", places.len());

    for place in places {
        let badge = if place.featured { " ⭐ Destacado" } else { "" };
        println!("- {}{badge}", place.name);
        println!("  {} | {} / 5", place.address, place.rating);
        println!("  {}", maps_search_url(place));
    }
}
