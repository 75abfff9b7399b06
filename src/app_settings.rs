// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Store key holding the last selected language code.
pub const STORAGE_KEY: &str = "kbLang";

/// Language used when nothing is stored and the config names none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "KEYSLATE_CONFIG";

/// Store file used by the driver when the config names none.
pub const DEFAULT_STORE_FILE: &str = "keyslate-store.json";
