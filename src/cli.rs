//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};

use crate::options::{OptionValue, Options};

/// Placeholder image URLs and downloads for dummyimage.com and loremflickr.com.
#[derive(Parser, Debug)]
#[command(name = "placeholder", version, about)]
pub struct Cli {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long, global = true, env = "PLACEHOLDER_DEBUG")]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the image URL.
    Url(ImageArgs),

    /// Download the image and print where it was saved.
    Save {
        /// Image selection and style.
        #[command(flatten)]
        image: ImageArgs,

        /// Target directory (defaults to the system temp dir).
        #[arg(short, long)]
        dir: Option<String>,

        /// Print only the filename instead of the full path.
        #[arg(long)]
        filename_only: bool,
    },
}

/// Service, size, and style flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Service: dummyimage, loremflickr.
    pub service: String,

    /// Width in pixels.
    #[arg(allow_negative_numbers = true)]
    pub width: i64,

    /// Height in pixels.
    #[arg(allow_negative_numbers = true)]
    pub height: i64,

    /// Background color, hex (dummyimage).
    #[arg(long)]
    pub bg: Option<String>,

    /// Foreground color, hex (dummyimage).
    #[arg(long)]
    pub fg: Option<String>,

    /// Overlay text (dummyimage).
    #[arg(long)]
    pub text: Option<String>,

    /// Image extension: jpg, png, gif.
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Color filter: g, red, green, blue (loremflickr).
    #[arg(long)]
    pub filter: Option<String>,

    /// Keyword, repeatable (loremflickr).
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Keyword logic: or, and (loremflickr).
    #[arg(long)]
    pub logic: Option<String>,
}

impl ImageArgs {
    /// Turn the flags into provider options; unset flags are left out.
    #[must_use]
    pub fn to_options(&self) -> Options {
        let mut options = Options::new();
        for (key, value) in [
            ("bg", &self.bg),
            ("fg", &self.fg),
            ("text", &self.text),
            ("extension", &self.extension),
            ("filter", &self.filter),
            ("logic", &self.logic),
        ] {
            if let Some(value) = value {
                options.insert(key, value.clone());
            }
        }
        if !self.keywords.is_empty() {
            options.insert("keywords", OptionValue::List(self.keywords.clone()));
        }
        options
    }
}
