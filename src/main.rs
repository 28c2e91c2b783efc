// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;

use lens_i18n::config;
use lens_i18n::error::{Error, Result};
use lens_i18n::plugin::I18n;
use lens_i18n::scene::Scene;
use tracing_subscriber::EnvFilter;

const DEMO_SCENE: &str = include_str!("../demos/scene.toml");

fn cli_error(err: pico_args::Error) -> Error {
    Error::Config(err.to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let lang: Option<String> = args.opt_value_from_str("--lang").map_err(cli_error)?;
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config").map_err(cli_error)?;
    let server = args.contains("--server");
    let dump_timeline = args.contains("--dump-timeline");
    let scene_path = args.finish().into_iter().next().map(PathBuf::from);

    let mut config = match &config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if server {
        config.server_side = Some(true);
    }

    let i18n = I18n::from_config(&config, lang.as_deref())?;
    let scene = match &scene_path {
        Some(path) => Scene::load(path)?,
        None => Scene::parse(DEMO_SCENE)?,
    };

    for line in scene.run(&i18n)? {
        println!("{line}");
    }

    if dump_timeline {
        match i18n.timeline() {
            Some(timeline) => print!("{}", timeline.export_toml()?),
            None => tracing::warn!("devtools are disabled, no timeline was recorded"),
        }
    }
    Ok(())
}
