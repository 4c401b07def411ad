//! Banner Configuration
//!
//! Options use the `-name=value` form. `-box` and `-h` take no value.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable read by `-textSrc=ENVVAR`
pub const TEXT_ENV_VAR: &str = "BOOT_TEXT_STR";

/// Text used when `-textSrc=ENVVAR` and the variable is unset
pub const MISSING_ENV_TEXT: &str = "Environment variable BOOT_TEXT_STR is not set!";

/// Text used when `-textSrc=PARAM` and no `-text` was passed
pub const MISSING_PARAM_TEXT: &str = "No -text= passed";

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];
const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Option parsing errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid argument format: {0}")]
    InvalidFormat(String),

    #[error("Duplicated value: {0}")]
    Duplicate(String),

    #[error("Unknown argument: {0}")]
    Unknown(String),

    #[error("Invalid value for argument {option}: {reason}")]
    InvalidValue { option: String, reason: String },
}

/// Where the banner text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSource {
    /// No text; only the blank canvas is written
    None,
    /// The `-text` option
    #[default]
    Param,
    /// The `BOOT_TEXT_STR` environment variable
    EnvVar,
}

/// Physical size and resolution of the target display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    pub width_mm: i32,
    pub height_mm: i32,
    pub width_px: i32,
    pub height_px: i32,
}

impl Default for DisplayGeometry {
    /// The 174 x 104 mm, 1280 x 768 TFT panel
    fn default() -> Self {
        Self {
            width_mm: 174,
            height_mm: 104,
            width_px: 1280,
            height_px: 768,
        }
    }
}

impl DisplayGeometry {
    /// Largest accepted width or height in pixels
    pub const MAX_RESOLUTION: i32 = 16384;

    /// Parse `WMMxHMM@WxH`, e.g. `174x104@1280x768`
    fn parse(value: &str) -> Option<Self> {
        let (physical, resolution) = value.split_once('@')?;
        let (width_mm, height_mm) = parse_pair(physical)?;
        let (width_px, height_px) = parse_pair(resolution)?;
        if width_px > Self::MAX_RESOLUTION || height_px > Self::MAX_RESOLUTION {
            return None;
        }
        Some(Self { width_mm, height_mm, width_px, height_px })
    }
}

fn parse_pair(value: &str) -> Option<(i32, i32)> {
    let (a, b) = value.split_once('x')?;
    let a = a.trim().parse().ok().filter(|v: &i32| *v > 0)?;
    let b = b.trim().parse().ok().filter(|v: &i32| *v > 0)?;
    Some((a, b))
}

/// Banner configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct BannerConfig {
    /// TrueType/OpenType font file
    pub font_path: PathBuf,

    /// Text passed with `-text`
    pub text: Option<String>,

    /// Where the text comes from
    pub text_source: TextSource,

    /// Font size in points
    pub point_size: i32,

    /// DPI to use instead of deriving it from the display
    pub dpi_override: Option<i32>,

    /// Target display
    pub display: DisplayGeometry,

    /// PNG file to write
    pub output: PathBuf,

    /// Outline the text bounding box
    pub draw_box: bool,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: Option<String>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("/usr/fonts/DejaVuSans.ttf"),
            text: None,
            text_source: TextSource::Param,
            point_size: 16,
            dpi_override: None,
            display: DisplayGeometry::default(),
            output: PathBuf::from("banner.png"),
            draw_box: false,
            log_level: None,
        }
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(BannerConfig),
    Help,
}

/// One accepted option
struct OptionSpec {
    name: &'static str,
    format: &'static str,
    usage: &'static str,
}

const OPTIONS: &[OptionSpec] = &[
    OptionSpec { name: "-v", format: "[-v=1..4]", usage: "Verbosity (optional): 1-Error, 2-Warning+, 3-Info+, 4-Debug+. Level names such as trace are also accepted. RUST_LOG takes precedence. Default: 3" },
    OptionSpec { name: "-font", format: "[-font=fullPathToFontFile]", usage: "Font file to use (optional). Default: /usr/fonts/DejaVuSans.ttf" },
    OptionSpec { name: "-text", format: "[-text=\"Display text\"]", usage: "Non-empty text to display." },
    OptionSpec { name: "-textSrc", format: "[-textSrc={NONE|PARAM|ENVVAR}]", usage: "NONE for no text; ENVVAR for BOOT_TEXT_STR=\"..\"; PARAM for -text=\"..\". Default: PARAM" },
    OptionSpec { name: "-size", format: "[-size=points]", usage: "Font size in points (optional). Default: 16" },
    OptionSpec { name: "-dpi", format: "[-dpi=N]", usage: "Display DPI (optional). Default: derived from -display" },
    OptionSpec { name: "-display", format: "[-display=WMMxHMM@WxH]", usage: "Physical size and resolution. Default: 174x104@1280x768" },
    OptionSpec { name: "-out", format: "[-out=file.png]", usage: "Output PNG file. Default: banner.png" },
    OptionSpec { name: "-box", format: "[-box]", usage: "Outline the text bounding box." },
];

impl BannerConfig {
    /// Parse command-line options, excluding the program name
    pub fn from_args<I>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut config = Self::default();
        let mut seen = HashSet::new();

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "-h" | "-help" | "--help" => return Ok(Command::Help),
                "-box" => {
                    if !seen.insert("-box") {
                        return Err(ConfigError::Duplicate(arg.to_string()));
                    }
                    config.draw_box = true;
                    continue;
                }
                _ => {}
            }

            let (name, value) = arg
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidFormat(arg.to_string()))?;
            let spec = OPTIONS
                .iter()
                .find(|spec| spec.name == name && spec.name != "-box")
                .ok_or_else(|| ConfigError::Unknown(name.to_string()))?;
            if !seen.insert(spec.name) {
                return Err(ConfigError::Duplicate(name.to_string()));
            }
            config.apply(spec.name, value)?;
        }

        Ok(Command::Run(config))
    }

    fn apply(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            option: name.to_string(),
            reason: reason.to_string(),
        };

        match name {
            "-v" => {
                let level = match value {
                    "1" => "error",
                    "2" => "warn",
                    "3" => "info",
                    "4" => "debug",
                    _ if LOG_LEVELS.contains(&value) => value,
                    _ => return Err(invalid("expected 1..4 or a log level name")),
                };
                self.log_level = Some(level.to_string());
            }
            "-font" => {
                validate_font(Path::new(value)).map_err(|reason| invalid(reason))?;
                self.font_path = PathBuf::from(value);
            }
            "-text" => {
                if value.is_empty() {
                    return Err(invalid("text is empty"));
                }
                self.text = Some(value.to_string());
            }
            "-textSrc" => {
                self.text_source = match value {
                    "NONE" => TextSource::None,
                    "PARAM" => TextSource::Param,
                    "ENVVAR" => TextSource::EnvVar,
                    _ => return Err(invalid("expected NONE, PARAM or ENVVAR")),
                };
            }
            "-size" => self.point_size = parse_positive(value).ok_or_else(|| invalid("expected a positive integer"))?,
            "-dpi" => self.dpi_override = Some(parse_positive(value).ok_or_else(|| invalid("expected a positive integer"))?),
            "-display" => {
                self.display = DisplayGeometry::parse(value)
                    .ok_or_else(|| invalid("expected WMMxHMM@WxH with positive numbers, at most 16384 pixels a side"))?;
            }
            "-out" => {
                if value.is_empty() {
                    return Err(invalid("output path is empty"));
                }
                self.output = PathBuf::from(value);
            }
            _ => return Err(ConfigError::Unknown(name.to_string())),
        }
        Ok(())
    }

    /// The text to render, or `None` for `-textSrc=NONE`
    ///
    /// `env` looks up environment variables.
    pub fn resolve_text(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        match self.text_source {
            TextSource::None => None,
            TextSource::Param => Some(
                self.text.clone().unwrap_or_else(|| MISSING_PARAM_TEXT.to_string()),
            ),
            TextSource::EnvVar => Some(
                env(TEXT_ENV_VAR)
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| MISSING_ENV_TEXT.to_string()),
            ),
        }
    }

    /// Usage text listing every option
    pub fn usage(program: &str) -> String {
        let mut usage = format!("Usage: {program}");
        for spec in OPTIONS {
            usage.push(' ');
            usage.push_str(spec.format);
        }
        usage.push_str("\n\nOptions:\n");
        for spec in OPTIONS {
            usage.push_str(&format!("  {:<40} {}\n", spec.format, spec.usage));
        }
        usage
    }
}

fn parse_positive(value: &str) -> Option<i32> {
    value.trim().parse().ok().filter(|v: &i32| *v > 0)
}

/// Check the extension is a supported font container and the file exists
fn validate_font(path: &Path) -> Result<(), &'static str> {
    if path.as_os_str().is_empty() {
        return Err("font path is empty");
    }
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or("no font file extension found")?;
    if !FONT_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)) {
        return Err("font extension is not a supported format");
    }
    if !path.is_file() {
        return Err("font file could not be opened");
    }
    Ok(())
}
