/*
 *  main.rs
 *
 *  InkBuddy - poems you can hold
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 */

use clap::{Arg, ArgAction, Command};
use env_logger::Env;
use log::{error, info, warn};
use std::path::Path;
use tokio::signal::unix::{signal, SignalKind};

use inkbuddy::apps::haiku::HaikuApp;
use inkbuddy::apps::pet::{self, BlockPet, ComicPet, SketchPet};
use inkbuddy::config::{self, Config};
use inkbuddy::error::AppError;
use inkbuddy::fonts;
use inkbuddy::hw;
use inkbuddy::touch::TouchWatcher;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Default seconds between haiku refreshes.
const DEFAULT_REFRESH_SECS: u64 = 300;

async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

async fn run_app(
    app: &str,
    panel: &mut hw::Panel,
    cfg: &Config,
    splash: bool,
) -> Result<(), AppError> {
    match app {
        "haiku" => {
            let haiku = HaikuApp {
                refresh_secs: cfg.refresh_secs.unwrap_or(DEFAULT_REFRESH_SECS),
                body_font: fonts::body_font(cfg.font.as_deref().unwrap_or("4x6")),
                splash,
            };
            haiku.run(panel).await
        }
        "pet" | "pet2" | "pet3" => {
            let touch_cfg = cfg.touch.clone().unwrap_or_default();
            let (mut touch, int_pin) = hw::open_touch(&touch_cfg)?;
            let watcher = TouchWatcher::spawn(int_pin);
            match app {
                "pet" => pet::run(panel, &mut touch, &watcher, &BlockPet).await,
                "pet2" => pet::run(panel, &mut touch, &watcher, &SketchPet).await,
                _ => pet::run(panel, &mut touch, &watcher, &ComicPet).await,
            }
        }
        other => unreachable!("clap rejects app mode {:?}", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Haiku and touch-pet apps for a 2.13\" touch e-paper HAT")
        .arg(Arg::new("app")
            .short('a')
            .long("app")
            .help("Which app to run")
            .value_parser(["haiku", "pet", "pet2", "pet3"])
            .default_value("haiku")
            .required(false))
        .arg(Arg::new("config")
            .short('c')
            .long("config")
            .help("Config file (YAML); searched for if omitted")
            .required(false))
        .arg(Arg::new("refresh-secs")
            .short('r')
            .long("refresh-secs")
            .help("Seconds between haiku refreshes")
            .value_parser(clap::value_parser!(u64))
            .required(false))
        .arg(Arg::new("font")
            .short('f')
            .long("font")
            .help("Body font: 4x6|small, 5x8|medium, 6x10|large")
            .required(false))
        .arg(Arg::new("no-splash")
            .long("no-splash")
            .help("Skip startup card (shown by default)")
            .action(ArgAction::SetTrue)
            .required(false))
        .arg(Arg::new("debug")
            .short('v')
            .long("debug")
            .help("Verbose logging")
            .action(ArgAction::SetTrue)
            .required(false))
        .after_help("InkBuddy:\
            \n\tHaiku cards on a pocket e-paper panel\
            \n\tor a touch-reactive desk pet.\
            \n\n\
            TOUCH (pet modes):\
            \n\ttop third    dance\
            \n\tmiddle third happy\
            \n\tbottom third sleep / wake")
        .get_matches();

    let debug_enabled = matches.get_flag("debug");
    let skip_splash = matches.get_flag("no-splash");
    let app = matches.get_one::<String>("app").map(String::as_str).unwrap_or("haiku");

    env_logger::Builder::from_env(
        Env::default().default_filter_or(if debug_enabled { "debug" } else { "info" }),
    )
    .format_timestamp_secs()
    .init();

    info!("{} - poems you can hold", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let mut cfg = config::load(matches.get_one::<String>("config").map(Path::new))?;

    // CLI overrides layered on top of file settings
    let overrides = Config {
        refresh_secs: matches.get_one::<u64>("refresh-secs").copied(),
        font: matches.get_one::<String>("font").cloned(),
        ..Default::default()
    };
    config::merge(&mut cfg, overrides);
    config::validate(&cfg)?;

    let display_cfg = cfg.display.clone().unwrap_or_default();
    let mut panel = hw::open_panel(&display_cfg)?;

    info!("Starting app '{}'", app);
    tokio::select! {
        _ = signal_handler() => {}
        res = run_app(app, &mut panel, &cfg, !skip_splash) => {
            // the app loops run forever; reaching here means they failed
            if let Err(e) = res {
                error!("App '{}' failed: {}", app, e);
            }
        }
    }

    info!("Putting panel to sleep");
    if let Err(e) = panel.sleep() {
        warn!("Panel sleep failed: {}", e);
    }
    info!("Goodbye");
    Ok(())
}
