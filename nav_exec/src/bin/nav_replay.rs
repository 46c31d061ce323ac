//! # Navigation Replay
//!
//! This binary runs the navigation controller over a recorded sequence of perception snapshots,
//! without requiring the simulator. It is designed to allow quick and easy development of the
//! navigation modes themselves.
//!
//! The script is a JSON-lines file, one [`Snapshot`] per line. The telemetry of every tick is
//! written to `nav_tm.jsonl` in the session directory.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use comms_if::eqpt::perception::Snapshot;
use log::{debug, info, warn};
use nav_lib::NavCtrl;
use structopt::StructOpt;
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Replay recorded perception snapshots through the navigation controller.
#[derive(Debug, StructOpt)]
#[structopt(name = "nav_replay")]
struct Opts {
    /// JSON-lines file containing one perception snapshot per line.
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// NavCtrl parameter file.
    #[structopt(long, parse(from_os_str), default_value = "params/nav_ctrl.toml")]
    params: PathBuf,

    /// Directory in which the session directory is created.
    #[structopt(long, parse(from_os_str), default_value = "sessions")]
    sessions_dir: PathBuf,

    /// Stop replaying as soon as the controller reaches Done.
    #[structopt(long)]
    stop_on_done: bool,

    /// Show every tick's output on stdout, not just in the session log file.
    #[structopt(short, long)]
    verbose: bool,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("nav_replay", &opts.sessions_dir).wrap_err("Failed to create the session")?;

    // Initialise logger
    let log_level = if opts.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    logger_init(log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Navigation Replay\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", opts);

    // ---- MODULE INIT ----

    let mut nav_ctrl = NavCtrl::init(&opts.params).wrap_err("Failed to initialise NavCtrl")?;
    info!("NavCtrl init complete");

    let script = File::open(&opts.script)
        .wrap_err_with(|| format!("Failed to open the script {:?}", opts.script))?;

    let tm_path = session.path("nav_tm.jsonl");
    let mut tm_writer = BufWriter::new(
        File::create(&tm_path).wrap_err("Failed to create the telemetry file")?,
    );

    info!("Replaying snapshots from {:?}\n", opts.script);

    // ---- MAIN LOOP ----

    let mut num_ticks: u64 = 0;

    for (line_num, line) in BufReader::new(script).lines().enumerate() {
        let line = line.wrap_err("Failed to read from the script")?;

        // Allow blank lines between snapshots
        if line.trim().is_empty() {
            continue;
        }

        let snapshot: Snapshot = serde_json::from_str(&line)
            .map_err(|e| eyre!("Invalid snapshot on line {}: {}", line_num + 1, e))?;

        nav_ctrl.tick(&snapshot);
        num_ticks += 1;

        serde_json::to_writer(&mut tm_writer, &nav_ctrl.get_tm())
            .wrap_err("Failed to serialise the telemetry")?;
        tm_writer
            .write_all(b"\n")
            .wrap_err("Failed to write the telemetry")?;

        if opts.stop_on_done && nav_ctrl.is_done() {
            info!("NavCtrl is Done, stopping the replay");
            break;
        }
    }

    tm_writer
        .flush()
        .wrap_err("Failed to write the telemetry")?;

    // ---- SUMMARY ----

    if num_ticks == 0 {
        warn!("The script contained no snapshots");
    }

    info!(
        "Replayed {} snapshots, final mode: {}",
        num_ticks,
        nav_ctrl.mode()
    );
    info!("Telemetry written to {:?}", tm_path);

    Ok(())
}
