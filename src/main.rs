use clap::{Parser, Subcommand};
use std::fs;
use std::process::ExitCode;

use satboard::sim::{
    derive_parameters, derive_telemetry, extrapolate_position, validate_fix, FixSet,
    DEFAULT_DOPPLER_BAND,
};
use satboard::web::Config;

#[derive(Parser)]
#[command(name = "satboard")]
#[command(about = "Satellite dashboard backend with dead-reckoned extrapolation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feed loop, extrapolation engine and HTTP API
    Serve {
        #[arg(long, default_value = "satboard.yaml")]
        config: String,
    },
    /// Evaluate the engine once against a fixes file and print the result
    Simulate {
        /// JSON file with a feed payload (satellites + lastUpdateTimestamp)
        fixes: String,
        /// Seconds to advance each fix by
        #[arg(long, default_value_t = 0.0)]
        elapsed: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config).await,
        Commands::Simulate { fixes, elapsed } => simulate(&fixes, elapsed),
    }
}

async fn serve(config_path: &str) -> ExitCode {
    let config = match Config::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    match satboard::web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn simulate(path: &str, elapsed: f64) -> ExitCode {
    let json = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let set: FixSet = match serde_json::from_str(&json) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} fixes, reference {}",
        set.fixes.len(),
        set.reference_timestamp
    );

    let mut rejected = 0;
    for fix in &set.fixes {
        if !validate_fix(fix) {
            rejected += 1;
            continue;
        }
        let params = derive_parameters(&fix.id, fix.height_km);
        let position = extrapolate_position(fix, &params, elapsed);
        let state = derive_telemetry(
            fix.latitude_deg,
            fix.longitude_deg,
            &position,
            fix,
            DEFAULT_DOPPLER_BAND,
        );
        println!(
            "  {} @ +{}s: lat {:.3} lon {:.3} alt {:.1} km vel {:.2} km/s hdg {:.1} rng {:.0} km dop {:.5}",
            state.id,
            elapsed,
            state.latitude_deg,
            state.longitude_deg,
            state.height_km,
            state.velocity_km_s,
            state.heading_deg,
            state.range_km,
            state.doppler_factor
        );
    }

    if rejected > 0 {
        eprintln!("{} fixes rejected by the sanity gate", rejected);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
