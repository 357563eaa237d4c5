use crate::error::{PunchError, Result};
use crate::render::ImageFormat;
use chrono::FixedOffset;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

pub const DEFAULT_WIDTH: u32 = 1100;

const KEYS: [&str; 8] = [
    "width", "author", "file", "path", "opaque", "utc", "timezone", "plotter",
];

/// Circle shading: derived from weight, or one fixed gray level (0 = black, 1 = white).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Opaque {
    #[default]
    Auto,
    Gray(f64),
}

impl Opaque {
    /// Gray level for a cell of the given weight.
    pub fn shade(self, weight: f64) -> f64 {
        match self {
            Opaque::Auto => 1.0 - weight,
            Opaque::Gray(level) => level,
        }
    }
}

impl FromStr for Opaque {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Opaque::Auto);
        }
        let level: f64 = s
            .parse()
            .map_err(|_| format!("expected 'auto' or a number, got '{s}'"))?;
        if !(0.0..=1.0).contains(&level) {
            return Err(format!("gray level {level} is outside 0..=1"));
        }
        Ok(Opaque::Gray(level))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plotter {
    /// SVG or bitmap image, format picked from the file extension.
    Image,
    Terminal,
    Json,
}

impl Plotter {
    /// Picks a backend from an output file extension.
    pub fn from_extension(path: &Path) -> Result<Self> {
        if ImageFormat::from_path(path).is_some() {
            return Ok(Plotter::Image);
        }
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "json" => Ok(Plotter::Json),
            "txt" => Ok(Plotter::Terminal),
            "" => Err(PunchError::InvalidOption(format!(
                "cannot infer output format of '{}' without an extension",
                path.display()
            ))),
            other => Err(PunchError::InvalidOption(format!(
                "unsupported output format '.{other}' (use .svg, .png, .jpg, .bmp, .json or .txt)"
            ))),
        }
    }
}

impl FromStr for Plotter {
    type Err = PunchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "image" | "svg" | "png" => Ok(Plotter::Image),
            "terminal" | "term" => Ok(Plotter::Terminal),
            "json" => Ok(Plotter::Json),
            other => Err(PunchError::InvalidOption(format!(
                "unknown plotter '{other}' (expected image, terminal or json)"
            ))),
        }
    }
}

/// Settings for one run. Built once from the command line and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: u32,
    pub author: Option<String>,
    /// Output file; `None` displays on the terminal.
    pub file: Option<PathBuf>,
    /// Repository to read the log from.
    pub path: PathBuf,
    pub opaque: Opaque,
    /// Offset every commit is converted to before binning.
    pub timezone: Option<FixedOffset>,
    pub plotter: Plotter,
    /// Flags forwarded verbatim to `git log`.
    pub git_args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            author: None,
            file: None,
            path: PathBuf::from("."),
            opaque: Opaque::Auto,
            timezone: None,
            plotter: Plotter::Terminal,
            git_args: Vec::new(),
        }
    }
}

impl Config {
    /// Folds `key=value` tokens and `-flags` into a config.
    ///
    /// Unknown keys and stray tokens are errors. Numeric values that fail to
    /// parse are logged and replaced by their defaults.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        let mut plotter: Option<Plotter> = None;
        let mut utc = false;
        let mut timezone: Option<FixedOffset> = None;

        for token in tokens {
            let token = token.as_ref();
            if token.starts_with('-') {
                config.git_args.push(token.to_string());
                continue;
            }

            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (token, None),
            };

            if !KEYS.contains(&key) {
                return Err(PunchError::UnknownOption(format!(
                    "'{key}' (expected one of: {})",
                    KEYS.join(", ")
                )));
            }

            if key == "utc" {
                utc = parse_bool(value.unwrap_or("true")).unwrap_or_else(|| {
                    warn!(value = value.unwrap_or(""), "invalid utc value, using false");
                    false
                });
                continue;
            }

            let value = value.ok_or_else(|| {
                PunchError::InvalidOption(format!("'{key}' requires a value ({key}=...)"))
            })?;

            match key {
                "width" => config.width = parse_width(value),
                "author" => config.author = non_empty(value),
                "file" => config.file = non_empty(value).map(PathBuf::from),
                "path" => {
                    config.path = non_empty(value)
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from("."))
                }
                "opaque" => {
                    config.opaque = value.parse::<Opaque>().unwrap_or_else(|e| {
                        warn!("invalid opaque value: {e}, using auto");
                        Opaque::Auto
                    })
                }
                "timezone" => timezone = parse_timezone(value),
                "plotter" => plotter = Some(value.parse::<Plotter>()?),
                _ => unreachable!("key checked against KEYS"),
            }
        }

        config.timezone = match (timezone, utc) {
            (Some(tz), _) => Some(tz),
            (None, true) => FixedOffset::east_opt(0),
            (None, false) => None,
        };

        config.plotter = match (plotter, config.file.as_deref()) {
            (Some(p), _) => p,
            (None, Some(file)) => Plotter::from_extension(file)?,
            (None, None) => Plotter::Terminal,
        };

        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_width(value: &str) -> u32 {
    match value.parse::<u32>() {
        Ok(w) if w > 0 => w,
        _ => {
            warn!(value, "invalid width, using {DEFAULT_WIDTH}");
            DEFAULT_WIDTH
        }
    }
}

/// Hours east of UTC, fractional hours allowed (`5.5`, `-3`).
fn parse_timezone(value: &str) -> Option<FixedOffset> {
    let offset = value
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .and_then(|h| FixedOffset::east_opt((h * 3600.0).round() as i32));
    if offset.is_none() {
        warn!(value, "invalid timezone, keeping commit offsets");
    }
    offset
}
