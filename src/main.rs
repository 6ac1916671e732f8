use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_planner::{
    allocate,
    config::Config,
    models::{BookingRequest, Occupancy, SeatSelection, VenueLayout},
    sellable_capacity,
    services::booking::check_request,
    AppState, Unplaceable,
};

#[derive(Parser)]
#[command(name = "seat-planner", about = "Seat allocation for theatre bookings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find seats for one booking
    Place {
        #[arg(long, env = "SEAT_PLANNER_LAYOUT")]
        layout: PathBuf,
        /// Occupied seats, comma separated (A1,A2,B7)
        #[arg(long, value_delimiter = ',')]
        occupied: Vec<String>,
        #[arg(long)]
        seats: u32,
        #[arg(long, default_value_t = 0)]
        accessible: u32,
    },
    /// Print sellable capacity of a layout
    Capacity {
        #[arg(long, env = "SEAT_PLANNER_LAYOUT")]
        layout: PathBuf,
    },
    /// Print each row as seen from the stage, with the aisle
    Plan {
        #[arg(long, env = "SEAT_PLANNER_LAYOUT")]
        layout: PathBuf,
    },
    /// Book groups one after another on a fresh event (4 or 4:1 for one accessible seat)
    Simulate {
        #[arg(long, env = "SEAT_PLANNER_LAYOUT")]
        layout: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        groups: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Place { layout, occupied, seats, accessible } => {
            let layout = load_layout(&layout)?;
            let occupancy = Occupancy::from_labels(&occupied);
            let request = BookingRequest::accessible(seats, accessible);
            check_request(&request, config.booking.max_seats_per_booking)?;

            match allocate(&layout, &occupancy, &request) {
                Some(placement) => println!("{}", serde_json::to_string_pretty(&placement)?),
                None => {
                    let reason = if request.wants_accessible() {
                        Unplaceable::NoAccessibleSeats
                    } else {
                        Unplaceable::NoContiguousSeats
                    };
                    bail!(reason);
                }
            }
        }
        Command::Capacity { layout } => {
            let layout = load_layout(&layout)?;
            let report = json!({
                "physical_seats": layout.physical_seat_count(),
                "accessible_seats": layout.accessible_seat_count(),
                "sellable_capacity": sellable_capacity(&layout),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Plan { layout } => {
            let layout = load_layout(&layout)?;
            for row in &layout.rows {
                let ordering = layout.physical_order(row);
                let mut cells: Vec<String> = ordering.seats.iter().map(|n| format!("{:>3}", n)).collect();
                if let Some(aisle) = ordering.aisle {
                    cells.insert(aisle, " | ".to_string());
                }
                println!("{:>3} {}", row.id, cells.join(""));
            }
        }
        Command::Simulate { layout, groups } => {
            let layout = load_layout(&layout)?;
            let state = AppState::new(config);
            let venue = state.bookings.create_venue(layout).await?;
            let event = state.bookings.schedule_event(venue).await?;
            info!("Simulating {} groups on event {}", groups.len(), event);

            for group in &groups {
                let request = parse_group(group)?;
                match state.bookings.book(event, request, SeatSelection::Automatic).await {
                    Ok(booking) => {
                        let seats: Vec<String> = booking.seats.iter().map(ToString::to_string).collect();
                        println!("{:>5} -> {}", group, seats.join(" "));
                    }
                    Err(e) => println!("{:>5} -> {}", group, e),
                }
            }

            println!("{}", serde_json::to_string_pretty(&state.bookings.summary(event).await?)?);
        }
    }

    Ok(())
}

fn load_layout(path: &Path) -> anyhow::Result<VenueLayout> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read layout {}", path.display()))?;
    VenueLayout::from_json(&raw).with_context(|| format!("invalid layout {}", path.display()))
}

fn parse_group(raw: &str) -> anyhow::Result<BookingRequest> {
    let (seats, accessible) = match raw.split_once(':') {
        Some((seats, accessible)) => (seats, accessible),
        None => (raw, "0"),
    };
    let seats = seats.trim().parse().with_context(|| format!("bad group `{}`", raw))?;
    let accessible = accessible.trim().parse().with_context(|| format!("bad group `{}`", raw))?;
    Ok(BookingRequest::accessible(seats, accessible))
}
