//! Argument groups shared by several commands.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Args, Subcommand};
use qrseal_canonical::TimezoneOffset;
use qrseal_render::{Color, Contact, Content, Event, LogoMode, RenderConfig};
use std::path::PathBuf;

const WALL_CLOCK_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a local date-time such as `2025-12-31 23:59`.
pub fn parse_wall_clock(s: &str) -> Result<NaiveDateTime, String> {
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s.trim(), format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DD HH:MM[:SS], got '{s}'"))
}

/// Parses an RFC 3339 instant with offset.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| format!("expected RFC 3339 date-time with offset: {err}"))
}

/// Overrides for the `[render]` configuration.
#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Image side in pixels (100-1500)
    #[arg(long)]
    pub size: Option<u32>,
    /// Module colour as #RRGGBB
    #[arg(long, value_name = "#RRGGBB")]
    pub fg: Option<Color>,
    /// Background colour as #RRGGBB
    #[arg(long, value_name = "#RRGGBB")]
    pub bg: Option<Color>,
    /// Logo image; selects safe-zone mode unless a mode is given
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,
    /// Logo placement: none, embedded or safe-zone
    #[arg(long)]
    pub logo_mode: Option<LogoMode>,
    /// Logo alpha multiplier (0-255)
    #[arg(long)]
    pub opacity: Option<u8>,
    /// Logo side as a fraction of the image side (clamped to 0.05-0.25)
    #[arg(long)]
    pub logo_ratio: Option<f32>,
    /// Write the QR without a logo if the logo cannot be loaded
    #[arg(long)]
    pub logo_fallback: bool,
}

impl RenderArgs {
    /// Applies these flags on top of `base`.
    pub fn apply(&self, base: &RenderConfig) -> RenderConfig {
        let mut config = base.clone();
        if let Some(size) = self.size {
            config.qr_size = size;
        }
        if let Some(fg) = self.fg {
            config.foreground = fg;
        }
        if let Some(bg) = self.bg {
            config.background = bg;
        }
        if let Some(logo) = &self.logo {
            config.logo.path = Some(logo.clone());
            if config.logo.mode == LogoMode::None {
                config.logo.mode = LogoMode::SafeZone;
            }
        }
        if let Some(mode) = self.logo_mode {
            config.logo.mode = mode;
        }
        if let Some(opacity) = self.opacity {
            config.logo.opacity = opacity;
        }
        if let Some(ratio) = self.logo_ratio {
            config.logo.ratio = ratio;
        }
        config
    }
}

/// Arguments of `qrseal sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Private key (PKCS#8 or SEC1 PEM)
    #[arg(long)]
    pub key: PathBuf,
    /// Content to attest (or stdin if neither --data nor --data-file is given)
    #[arg(long, conflicts_with = "data_file")]
    pub data: Option<String>,
    /// Read the content to attest from a file
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,
    /// Document identifier
    #[arg(long)]
    pub doc_id: Option<String>,
    /// Author of the attestation
    #[arg(long)]
    pub created_by: Option<String>,
    /// Record the signing time
    #[arg(long)]
    pub timestamp: bool,
    /// Offset for the timestamp and expiration: UTC, WIB, WITA, WIT or +HH[:MM]
    #[arg(long)]
    pub timezone: Option<TimezoneOffset>,
    /// Expiration as local time in --timezone (YYYY-MM-DD HH:MM[:SS]); implies --timestamp
    #[arg(long, value_parser = parse_wall_clock)]
    pub expires: Option<NaiveDateTime>,
    /// Also write the QR image (.png, .jpg or .jpeg)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
    #[command(flatten)]
    pub render: RenderArgs,
}

/// Image destination and render overrides for `qrseal encode`.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image output (.png, .jpg or .jpeg)
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,
    #[command(flatten)]
    pub render: RenderArgs,
}

/// What to put in an unsigned QR code.
#[derive(Subcommand, Debug)]
pub enum EncodeKind {
    /// A link or any single line of text
    Link {
        /// The URL
        url: String,
        #[command(flatten)]
        image: ImageArgs,
    },
    /// A vCard 3.0 contact
    Contact {
        /// Display name
        #[arg(long)]
        name: String,
        /// International phone number; also added as a WhatsApp link
        #[arg(long)]
        phone: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Postal address
        #[arg(long)]
        address: Option<String>,
        /// Map link
        #[arg(long)]
        maps_url: Option<String>,
        #[command(flatten)]
        image: ImageArgs,
    },
    /// A vCalendar 2.0 event
    Event {
        /// Event title
        #[arg(long)]
        title: String,
        /// Start, local time (YYYY-MM-DD HH:MM[:SS])
        #[arg(long, value_parser = parse_wall_clock)]
        start: Option<NaiveDateTime>,
        /// End, local time (YYYY-MM-DD HH:MM[:SS])
        #[arg(long, value_parser = parse_wall_clock)]
        end: Option<NaiveDateTime>,
        /// Location
        #[arg(long)]
        location: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        image: ImageArgs,
    },
}

impl EncodeKind {
    /// Splits into the QR content and where to write it.
    pub fn into_parts(self) -> (Content, ImageArgs) {
        match self {
            EncodeKind::Link { url, image } => (Content::Link(url), image),
            EncodeKind::Contact {
                name,
                phone,
                email,
                address,
                maps_url,
                image,
            } => (
                Content::Contact(Contact {
                    name,
                    phone,
                    email,
                    address,
                    maps_url,
                }),
                image,
            ),
            EncodeKind::Event {
                title,
                start,
                end,
                location,
                description,
                image,
            } => (
                Content::Event(Event {
                    title,
                    start,
                    end,
                    location,
                    description,
                }),
                image,
            ),
        }
    }
}
