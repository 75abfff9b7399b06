// SPDX-License-Identifier: GPL-3.0-only

//! Keyslate headless driver
//!
//! Replays a line-oriented event script against a keyboard and prints the
//! resulting text. The script is read from the file named by the first
//! argument, or from stdin.
//!
//! ```text
//! # comment
//! press ShiftLeft
//! press KeyA
//! release ShiftLeft
//! click KeyB      # pointer press
//! leave KeyB      # pointer left the key
//! switch          # language button
//! ```

use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use keyslate::config::Config;
use keyslate::input::KeyEvent;
use keyslate::layout::{
    load_default_resource, parse_resource_file, KeyboardResource, ParseError, ParseResult,
};
use keyslate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use keyslate::{app_settings, Keyboard};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keyslate=info".parse().unwrap()),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::var_os(app_settings::CONFIG_ENV) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let resource = match load_resource(&config) {
        Ok(result) => {
            for warning in &result.warnings {
                tracing::warn!("{}", warning);
            }
            result.into_layout()
        }
        Err(e) => {
            tracing::error!("Failed to load keyboard layout: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut keyboard = Keyboard::new(resource, open_store(&config), &config.default_language);

    let input: Box<dyn BufRead> = match std::env::args_os().nth(1) {
        Some(path) => match std::fs::File::open(&path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                tracing::error!("Failed to open script {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    for (line_no, line) in input.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read script: {}", e);
                return ExitCode::FAILURE;
            }
        };
        run_line(&mut keyboard, line_no + 1, &line);
    }

    println!("{}", keyboard.content());
    ExitCode::SUCCESS
}

fn load_resource(config: &Config) -> Result<ParseResult<KeyboardResource>, ParseError> {
    match &config.layout_path {
        Some(path) => parse_resource_file(&path.to_string_lossy()),
        None => load_default_resource(),
    }
}

fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    let path = config
        .store_path
        .clone()
        .unwrap_or_else(|| app_settings::DEFAULT_STORE_FILE.into());

    match JsonFileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("{}; language will not be remembered", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn run_line(keyboard: &mut Keyboard, line_no: usize, line: &str) {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return;
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let code = parts.next().unwrap_or_default();

    let event = match verb {
        "press" => KeyEvent::press(code),
        "repeat" => KeyEvent::repeat(code),
        "release" => KeyEvent::release(code),
        "click" => KeyEvent::pointer_press(code),
        "unclick" => KeyEvent::pointer_release(code),
        "leave" => KeyEvent::pointer_leave(code),
        "switch" => {
            keyboard.switch_language();
            return;
        }
        other => {
            tracing::warn!("line {}: unknown verb '{}'", line_no, other);
            return;
        }
    };

    let outcome = keyboard.handle_event(&event);
    tracing::debug!("line {}: {:?}", line_no, outcome);
}
