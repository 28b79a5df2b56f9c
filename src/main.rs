use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use util::Logos;

mod run;
use run::{Driver, Press};

mod view;

pub const GAME_NAME: &str = "chaos";

#[derive(Parser, Debug)]
#[command(name = GAME_NAME, about = "Run chaos effects on a simulated game")]
struct Args {
    #[arg(long, value_parser = |e: &str| Ok::<Logos, &str>(Logos::new(e)), help = "Effect randomization seed")]
    seed: Option<Logos>,

    #[arg(long, default_value_t = 3600, help = "Number of frames to run")]
    frames: u64,

    #[arg(long, help = "Scheduler config file in IDM format")]
    config: Option<PathBuf>,

    #[arg(long, help = "Start in manual mode with the effect menu")]
    manual: bool,

    #[arg(
        long = "press",
        value_name = "FRAME:BUTTONS",
        help = "Scripted controller input, eg. 120:L or 300:R+D_DOWN"
    )]
    presses: Vec<Press>,

    #[arg(short, long, help = "Log every effect activation")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    TermLogger::init(
        if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            engine::Config::from_idm(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => Default::default(),
    };
    if args.manual {
        config.debug_menu = true;
    }

    let seed = args
        .seed
        .unwrap_or_else(|| Logos::sample(&mut rand::thread_rng(), 10));
    log::info!("seed: {seed}");

    let mut driver = Driver::new(config, &seed, args.presses)?;
    driver.run(args.frames);

    log::info!("{}", view::overlay_text(&driver.scheduler.overlay()));
    Ok(())
}
