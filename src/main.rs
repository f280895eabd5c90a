//! medium-to-jekyll
//!
//! Converts the HTML files of a Medium export into Jekyll posts, written
//! next to each input, then fetches the images they reference.

use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::{ArgAction, CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

use medium_to_jekyll::config::{
    BulletMarker, CodeBlockStyle, CodeFence, EmphasisDelimiter, FigureStyle, HeadingStyle,
    LinkReferenceStyle, LinkStyle, RenderOptions, StrongDelimiter, ThematicBreak,
};
use medium_to_jekyll::utils::{DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_URL_PREFIX};
use medium_to_jekyll::{ConverterOptions, convert_files, supported_language_ids};

/// Convert Medium export HTML posts into Jekyll Markdown
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Exported post files (`posts/*.html`)
    files: Vec<PathBuf>,

    /// URL prefix for rewritten image references
    #[arg(long, default_value = DEFAULT_IMAGE_URL_PREFIX)]
    image_url_prefix: String,

    /// Download directory, relative to each input file
    #[arg(long, default_value = DEFAULT_IMAGE_DIR)]
    image_dir: PathBuf,

    /// Languages the code classifier may pick (comma separated, empty for all)
    #[arg(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Leave code blocks without a language tag
    #[arg(long)]
    no_detect_languages: bool,

    /// Print supported language ids and exit
    #[arg(long)]
    list_languages: bool,

    /// Write `{name}.images.txt` for `aria2c -i`
    #[arg(long)]
    image_list: bool,

    /// Skip downloading images
    #[arg(long)]
    no_download: bool,

    /// Timezone for dates, e.g. `+09:00` (default: local)
    #[arg(long, value_parser = parse_utc_offset, allow_hyphen_values = true)]
    utc_offset: Option<FixedOffset>,

    #[arg(long = "md-hh", value_enum, default_value_t)]
    heading_style: HeadingStyle,

    #[arg(long = "md-hr", value_enum, default_value_t, allow_hyphen_values = true)]
    thematic_break: ThematicBreak,

    #[arg(long = "md-ul", value_enum, default_value_t, allow_hyphen_values = true)]
    bullet_marker: BulletMarker,

    #[arg(long = "md-code", value_enum, default_value_t)]
    code_block_style: CodeBlockStyle,

    #[arg(long = "md-fence", value_enum, default_value_t)]
    fence: CodeFence,

    #[arg(long = "md-em", value_enum, default_value_t)]
    emphasis_delimiter: EmphasisDelimiter,

    #[arg(long = "md-strong", value_enum, default_value_t)]
    strong_delimiter: StrongDelimiter,

    #[arg(long = "md-link", value_enum, default_value_t)]
    link_style: LinkStyle,

    #[arg(long = "md-ref", value_enum, default_value_t)]
    link_reference_style: LinkReferenceStyle,

    /// Figure rendering: caption as alt text, as title, or kept as HTML
    #[arg(long = "md-figure", value_enum, default_value_t)]
    figure_style: FigureStyle,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            heading_style: self.heading_style,
            thematic_break: self.thematic_break,
            bullet_marker: self.bullet_marker,
            code_block_style: self.code_block_style,
            fence: self.fence,
            emphasis_delimiter: self.emphasis_delimiter,
            strong_delimiter: self.strong_delimiter,
            link_style: self.link_style,
            link_reference_style: self.link_reference_style,
            figure_style: self.figure_style,
        }
    }

    fn converter_options(&self) -> Result<ConverterOptions> {
        let mut builder = ConverterOptions::builder()
            .image_url_prefix(self.image_url_prefix.clone())
            .image_dir(self.image_dir.clone())
            .detect_languages(!self.no_detect_languages)
            .download_images(!self.no_download)
            .write_image_list(self.image_list)
            .utc_offset(self.utc_offset)
            .render(self.render_options());

        // `--languages ""` clears the list, which means every language
        if let Some(languages) = &self.languages {
            builder = builder.languages(
                languages
                    .iter()
                    .map(|l| l.trim())
                    .filter(|l| !l.is_empty())
                    .map(String::from),
            );
        }

        builder.build().context("Invalid options")
    }
}

/// `+09:00` / `-0530` as chrono parses them, plus `Z`, `UTC` and whole hours (`+9`)
fn parse_utc_offset(value: &str) -> Result<FixedOffset, String> {
    let invalid = || format!("invalid UTC offset '{value}', expected e.g. +09:00");

    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }
    if let Ok(offset) = value.parse::<FixedOffset>() {
        return Ok(offset);
    }

    let (sign, hours) = match value.split_at_checked(1) {
        Some(("+", hours)) => (1, hours),
        Some(("-", hours)) => (-1, hours),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * hours * 3600).ok_or_else(invalid)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .filter_module("html5ever", log::LevelFilter::Warn)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_languages {
        for id in supported_language_ids() {
            println!("{id}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    if args.files.is_empty() {
        Args::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let options = args.converter_options()?;
    let report = convert_files(&args.files, &options).await;

    for outcome in report.downloads.iter().filter(|d| !d.is_success()) {
        eprintln!(
            "image download failed: {} ({})",
            outcome.url,
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    if report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
