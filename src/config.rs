/*
 *  config.rs
 *
 *  lifecal - life in little squares
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, command line
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
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::calendar::{PaletteOverride, Rgb};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CACHE_CAPACITY: u64 = 64;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration. Every field is optional in YAML.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Tried in order before the system font list
    pub font_paths: Vec<PathBuf>,
    pub palette: PaletteConfig,
}

/// Hex overrides applied on top of every calendar's own palette.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: Option<String>,
    pub past: Option<String>,
    pub current: Option<String>,
    pub future: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// 0 disables the render cache
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "lifecal", version, about = "Life, year and goal calendar wallpapers")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    /// Caption font, may be given more than once
    #[arg(long = "font", value_hint = ValueHint::FilePath, action = ArgAction::Append)]
    pub fonts: Vec<PathBuf>,
    /// Shorthand for --log-level debug
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    pub debug: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

impl Config {
    /// Built-in values, the bottom layer.
    pub fn defaults() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            server: ServerConfig {
                host: Some(DEFAULT_HOST.to_string()),
                port: Some(DEFAULT_PORT),
            },
            render: RenderConfig::default(),
            cache: CacheConfig {
                capacity: Some(DEFAULT_CACHE_CAPACITY),
                ttl_secs: Some(DEFAULT_CACHE_TTL_SECS),
            },
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn bind_address(&self) -> String {
        let host = self.server.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.server.port.unwrap_or(DEFAULT_PORT);
        format!("{host}:{port}")
    }

    pub fn cache_capacity(&self) -> u64 {
        self.cache.capacity.unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS))
    }

    /// Parsed palette overrides; fails on any entry that is not `#rrggbb`.
    pub fn palette_override(&self) -> Result<PaletteOverride, ConfigError> {
        let p = &self.render.palette;
        Ok(PaletteOverride {
            background: parse_color("background", p.background.as_deref())?,
            past: parse_color("past", p.past.as_deref())?,
            current: parse_color("current", p.current.as_deref())?,
            future: parse_color("future", p.future.as_deref())?,
            text: parse_color("text", p.text.as_deref())?,
        })
    }
}

fn parse_color(name: &str, value: Option<&str>) -> Result<Option<Rgb>, ConfigError> {
    value
        .map(|v| {
            v.parse::<Rgb>()
                .map_err(|e| ConfigError::Validation(format!("render.palette.{name}: {e}")))
        })
        .transpose()
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Everything `load` does apart from reading argv and `--dump-config`.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults
    let mut cfg = Config::defaults();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/lifecal/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/lifecal/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/lifecal.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["lifecal.yaml", "config.yaml", "config/lifecal.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()          { dst.log_level = src.log_level; }
    if src.server.host.is_some()        { dst.server.host = src.server.host; }
    if src.server.port.is_some()        { dst.server.port = src.server.port; }
    if !src.render.font_paths.is_empty() { dst.render.font_paths = src.render.font_paths; }
    merge_palette(&mut dst.render.palette, src.render.palette);
    if src.cache.capacity.is_some()     { dst.cache.capacity = src.cache.capacity; }
    if src.cache.ttl_secs.is_some()     { dst.cache.ttl_secs = src.cache.ttl_secs; }
}

fn merge_palette(dst: &mut PaletteConfig, src: PaletteConfig) {
    if src.background.is_some() { dst.background = src.background; }
    if src.past.is_some()       { dst.past = src.past; }
    if src.current.is_some()    { dst.current = src.current; }
    if src.future.is_some()     { dst.future = src.future; }
    if src.text.is_some()       { dst.text = src.text; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() { cfg.log_level = cli.log_level.clone(); }
    if cli.debug               { cfg.log_level = Some("debug".to_string()); }
    if cli.host.is_some()      { cfg.server.host = cli.host.clone(); }
    if cli.port.is_some()      { cfg.server.port = cli.port; }
    if !cli.fonts.is_empty()   { cfg.render.font_paths = cli.fonts.clone(); }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.server.port == Some(0) {
        return Err(ConfigError::Validation("server port must be > 0".into()));
    }
    if let Some(host) = cfg.server.host.as_deref() {
        if host.trim().is_empty() {
            return Err(ConfigError::Validation("server host must not be empty".into()));
        }
    }
    let level = cfg.log_level().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::Validation(format!(
            "log_level must be one of {}",
            LOG_LEVELS.join("|")
        )));
    }
    cfg.palette_override()?;
    Ok(())
}
