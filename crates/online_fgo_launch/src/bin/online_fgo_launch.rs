//! online_fgo launch composer CLI
//!
//! Usage:
//!   online_fgo_launch
//!   online_fgo_launch --profile deutschland_lc -a log_level:=info
//!   online_fgo_launch --share-dir install/online_fgo/share/online_fgo --format yaml

use online_fgo_launch::cli::render_description;
use online_fgo_launch::{
    AmentIndexLocator, ArgumentNaming, ComposerConfig, LaunchArgs, LaunchComposer,
    PackageLocator, StaticLocator,
};

fn main() {
    let args: LaunchArgs = argh::from_env();

    // Initialize logging
    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    env_logger::init_from_env(env);

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &LaunchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading composer config: {}", path);
            ComposerConfig::from_file(path)?
        }
        None => ComposerConfig::default(),
    };

    if let Some(package) = &args.package {
        config.package = package.clone();
    }
    if let Some(profile) = &args.profile {
        config.profile = profile.clone();
    }
    if args.legacy_names {
        config.naming = ArgumentNaming::Legacy;
    }
    config.require_existing_files |= args.require_files;
    config.validate()?;

    let locator: Box<dyn PackageLocator> = match &args.share_dir {
        Some(dir) => Box::new(StaticLocator::new().with_package(&config.package, dir)),
        None => Box::new(AmentIndexLocator::from_env()?),
    };

    let description = LaunchComposer::from_config(locator, &config).compose()?;
    log::info!(
        "Composed launch description for {}/{} ({} actions)",
        config.package,
        config.profile,
        description.actions().len()
    );

    let output = render_description(&description, args)?;
    println!("{}", output.trim_end());
    Ok(())
}
