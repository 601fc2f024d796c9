use clap::Parser;
use doily::config;
use doily::gui::app::AppModel;
use doily::sys::runtime;
use doily_core::DoilySurface;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "doily", version, about, long_about = None)]
struct Cli {
    /// Number of rotational sectors (overrides the config file)
    #[arg(short = 's', long)]
    sectors: Option<i32>,

    /// Pen diameter in pixels (overrides the config file)
    #[arg(short = 'p', long)]
    pen_size: Option<u32>,

    /// Write the default config file if missing and print its path
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default();
    if let Some(sectors) = cli.sectors {
        config.surface.sectors = sectors;
    }
    if let Some(pen_size) = cli.pen_size {
        config.surface.pen_size = pen_size;
    }
    let surface = DoilySurface::new(config.surface.to_surface_config()?);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // gtk must not see our own flags
    let app = RelmApp::new("org.doily.doily").with_args(Vec::new());

    app.run::<AppModel>((surface, config, rx));
    Ok(())
}
