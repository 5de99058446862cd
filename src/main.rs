use clap::Parser;
use kolibri_ingest::exclude::{DEFAULT_EXCLUDES, ExcludeFilter};
use kolibri_ingest::{config::IngestConfig, ingest, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kolibri-ingest")]
#[command(about = "Process a media export into web-ready gallery assets + media.json")]
#[command(long_about = "\
Process a media export into web-ready gallery assets + media.json

Walks the input tree, transcodes every recognized photo and video into
web-optimized variants at content-addressed paths, and writes a manifest
describing the gallery:

  <out>/assets/media/img/full/      full-size WebP images (max 1280px wide)
  <out>/assets/media/img/thumbs/    thumbnails (max 400px wide)
  <out>/assets/media/video/720p/    H.264 MP4s (requires ffmpeg on PATH)
  <out>/assets/media/video/posters/ one poster frame per video
  <out>/media.json                  manifest, sorted by date descending

Reruns are incremental: outputs that already exist are skipped unless
--force is given. Files that fail to transcode are reported and skipped;
the run always continues.")]
#[command(version)]
struct Cli {
    /// Path to the media export (or any folder of photos/videos)
    #[arg(long = "in", value_name = "DIR")]
    input: PathBuf,

    /// Path to the site root to populate
    #[arg(long = "out", value_name = "DIR")]
    output: PathBuf,

    /// Comma-separated directory names to skip wherever they appear
    #[arg(long, value_name = "NAMES", default_value = DEFAULT_EXCLUDES)]
    exclude_dirs: String,

    /// Re-encode even when outputs already exist
    #[arg(long)]
    force: bool,

    /// Worker threads for transforms (1 = sequential)
    #[arg(long, value_name = "N", default_value_t = 1)]
    threads: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = IngestConfig::new(cli.input, cli.output);
    config.excludes = ExcludeFilter::from_list(&cli.exclude_dirs);
    config.force = cli.force;
    config.threads = cli.threads.max(1);
    config.ffmpeg = IngestConfig::probe_ffmpeg();

    if config.ffmpeg.is_none() {
        eprintln!("warning: ffmpeg not found on PATH; videos will be skipped");
    }

    match ingest::run(&config) {
        Ok(summary) => {
            output::print_summary(
                &summary.report,
                &config.excludes.tokens(),
                &summary.manifest_path,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
