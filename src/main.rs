// Copyright 2020 TwoCookingMice

use dango::core::scene::Background;
use dango::core::settings::{load_settings, Settings};
use dango::emitters::envmap::EnvironmentMap;
use dango::io::timed_saver::TimedSaver;
use dango::renderers::progressive::ProgressiveRenderer;
use dango::scenes::create_scene;

use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::sync::Arc;

fn main() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("dango");
    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(Some(options)) => options,
        Ok(None) => {
            eprintln!("{}", usage(program));
            return;
        }
        Err(msg) => {
            log::error!("{}.", msg);
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let mut settings = match load_settings(&options.settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load {}: {}.", options.settings_path, e);
            process::exit(1);
        }
    };
    if let Some(seed) = options.seed {
        settings.render.seed = seed;
    }
    if let Some(threads) = options.threads {
        settings.render.threads = threads;
    }
    if let Some(dir) = options.output {
        settings.output_dir = dir;
    }

    if let Err(code) = run(&settings) {
        process::exit(code);
    }
}

struct Options {
    settings_path: String,
    seed: Option<u64>,
    threads: Option<usize>,
    output: Option<PathBuf>,
}

fn usage(program: &str) -> String {
    format!("Usage: {} [settings.xml] [--seed N] [--threads N] [--output DIR]", program)
}

fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args.get(i).ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse::<T>().map_err(|_| format!("invalid value '{}' for {}", raw, flag))
}

/// `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options {
        settings_path: String::from("settings.xml"),
        seed: None,
        threads: None,
        output: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                options.seed = Some(flag_value(args, i, "--seed")?);
            }
            "--threads" => {
                i += 1;
                options.threads = Some(flag_value(args, i, "--threads")?);
            }
            "--output" => {
                i += 1;
                options.output = Some(flag_value::<PathBuf>(args, i, "--output")?);
            }
            "-h" | "--help" => return Ok(None),
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            other => options.settings_path = other.to_string(),
        }
        i += 1;
    }
    Ok(Some(options))
}

fn run(settings: &Settings) -> Result<(), i32> {
    let mut scene = create_scene(&settings.scene).map_err(|e| {
        log::error!("{}.", e);
        2
    })?;
    if let Some(path) = &settings.environment_map {
        let map = EnvironmentMap::from_file(path, settings.environment_scale).map_err(|e| {
            log::error!("Failed to load {}: {}.", path.display(), e);
            2
        })?;
        scene.set_background(Background::Environment(Arc::new(map)));
    }

    let callback = if settings.save_on_each_sample {
        Some(settings.saver().into_callback())
    } else {
        None
    };

    let renderer = ProgressiveRenderer::new(Box::new(settings.camera()),
                                            Box::new(settings.integrator()),
                                            settings.render.clone(),
                                            callback)
        .map_err(|e| {
            log::error!("Invalid render settings: {}.", e);
            3
        })?;
    let renderer = Arc::new(renderer);

    let timed = settings.save_span.map(|span| {
        log::info!("Saving the latest image every {:.1} s.", span.as_secs_f64());
        TimedSaver::start(Arc::clone(&renderer), settings.saver(), span)
    });

    log::info!("Begin rendering scene '{}'.", settings.scene);
    let result = renderer.render_scene(&scene);

    if let Some(timed) = timed {
        timed.stop();
    }

    let summary = match result {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::error!("{}.", e);
            None
        }
    };

    if !settings.save_on_each_sample {
        if let Some((samples, image)) = renderer.latest_normalized() {
            let minutes = summary.as_ref().map(|s| s.elapsed_minutes).unwrap_or(0.0);
            match settings.saver().save(samples, &image, minutes) {
                Ok(path) => log::info!("Final image written to {}.", path.display()),
                Err(e) => {
                    log::error!("Failed to save the final image: {}.", e);
                    return Err(4);
                }
            }
        }
    }

    match summary {
        Some(summary) => {
            log::info!("Total rendering time = {:.2} min over {} checkpoints.",
                       summary.elapsed_minutes, summary.checkpoints.len());
            Ok(())
        }
        None => Err(5),
    }
}
