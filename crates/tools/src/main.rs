use std::path::PathBuf;
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};
use foundation::bounds::ViewportBounds;
use foundation::coordinate::Coordinate;
use scene::SortKey;
use tools::{Config, NearbyArgs, ReplayArgs, ViewOptions, cmd_nearby, cmd_replay, load_camera_events};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find food trucks in a map viewport")]
struct Args {
    /// Truck fixture JSON (overrides MUNCHMAP_TRUCKS).
    #[arg(long, global = true)]
    trucks: Option<PathBuf>,

    /// Camera settle window in milliseconds (overrides MUNCHMAP_SETTLE_MS).
    #[arg(long, global = true)]
    settle_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct View {
    /// User latitude, used for distance annotation.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Keep trucks serving at least one of these categories.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// rating | distance
    #[arg(long)]
    sort: Option<SortKey>,

    #[arg(long)]
    json: bool,
}

impl View {
    fn into_options(self) -> ViewOptions {
        let user_location = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };
        ViewOptions {
            user_location,
            categories: self.categories,
            sort: self.sort,
            json: self.json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List trucks inside a viewport.
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        north: f64,

        #[arg(long, allow_negative_numbers = true)]
        south: f64,

        #[arg(long, allow_negative_numbers = true)]
        east: f64,

        #[arg(long, allow_negative_numbers = true)]
        west: f64,

        #[command(flatten)]
        view: View,

        /// Select a truck by id.
        #[arg(long)]
        select: Option<String>,

        /// Move the selection forward this many times.
        #[arg(long, default_value_t = 0, conflicts_with = "prev")]
        next: u32,

        /// Move the selection backward this many times.
        #[arg(long, default_value_t = 0)]
        prev: u32,
    },
    /// Replay a recorded camera session through the settle window.
    Replay {
        #[arg(long)]
        events: PathBuf,

        #[command(flatten)]
        view: View,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Args::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main(args: Args) -> Result<(), String> {
    let mut config = Config::from_env();
    if let Some(path) = args.trucks {
        config.trucks_path = path;
    }
    if let Some(ms) = args.settle_ms {
        config.settle = Duration::from_millis(ms);
    }

    let out = match args.command {
        Command::Nearby {
            north,
            south,
            east,
            west,
            view,
            select,
            next,
            prev,
        } => {
            let step = selection_step(next, prev);
            let nearby = NearbyArgs {
                bounds: ViewportBounds::new(north, south, east, west),
                view: view.into_options(),
                select,
                step,
            };
            cmd_nearby(&config, nearby).await?
        }
        Command::Replay { events, view } => {
            let replay = ReplayArgs {
                events: load_camera_events(&events)?,
                view: view.into_options(),
            };
            cmd_replay(&config, replay).await?
        }
    };

    print!("{out}");
    Ok(())
}

/// Net selection movement: forward steps win, backward steps are negative.
fn selection_step(next: u32, prev: u32) -> i32 {
    if next > 0 {
        i32::try_from(next).unwrap_or(i32::MAX)
    } else {
        i32::try_from(prev).map_or(-i32::MAX, |p| -p)
    }
}
