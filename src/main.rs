use crate::reconcile::{ReconcileSettings, ReconciliationEngine};
use crate::repository::manifest::ManifestRepository;
use crate::settings::CliArgs;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

mod assets;
mod io;
mod reconcile;
mod repository;
mod settings;

fn main() -> anyhow::Result<()> {
    // The console log is the only reporting channel, so default to info instead of error.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    let records = io::document::load_object_info(&PathBuf::from(&args.object_info))?;
    let mut repository = ManifestRepository::open(&PathBuf::from(&args.repository_root))?;

    let settings = ReconcileSettings {
        texture_source_root: PathBuf::from(&args.source_root),
        image_extension: args.image_extension,
    };

    ReconciliationEngine::new(&mut repository, settings).run(&records)?;
    Ok(())
}
