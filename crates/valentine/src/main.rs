use clap::Parser;
use keepsake::navigator::Screen;
use relm4::prelude::*;
use std::path::PathBuf;
use valentine::config;
use valentine::gui::APP_ID;
use valentine::gui::app::{AppInit, AppModel};
use valentine::sys::runtime;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the images/ folder (overrides the config file)
    #[arg(short = 'a', long)]
    assets: Option<PathBuf>,

    /// Screen to open first: "ask" or "calendar"
    #[arg(short = 's', long)]
    screen: Option<Screen>,

    /// Write the default config file if none exists, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    if let Some(screen) = args.screen {
        config.start_screen = screen;
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap owns the command line; keep GTK from parsing it again
    let app = RelmApp::new(APP_ID).with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        assets_override: args.assets,
        events: rx,
    });
    Ok(())
}
