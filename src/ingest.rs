//! The ingestion walk: traverse, classify, transform, collect.
//!
//! Discovery is a flat pass over the input tree (sibling order is
//! filesystem-dependent and deliberately not a contract). Each discovered
//! file runs through the exclusion filter, extension classification, id
//! derivation with duplicate resolution, and the matching transform;
//! successes become manifest entries, failures become one diagnostic line
//! each, and the run never aborts for a bad file. Duplicate ids are resolved
//! before any transform runs, so a dropped file cannot touch the outputs of
//! the file that claimed the id first.
//!
//! With `threads > 1` the transforms move onto a dedicated rayon pool.
//! `par_iter().map().collect()` preserves input order, so the collected
//! results and the manifest are identical to a sequential run regardless of
//! completion order. Each video transform still runs its ffmpeg steps one
//! process at a time.

use crate::config::IngestConfig;
use crate::transform::TransformError;
use crate::types::{MediaItem, MediaKind};
use crate::{identity, imaging, manifest, output, video};
use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Fixed output subdirectories under the output root, forward-slash
/// separated because they double as URL prefixes in the manifest.
pub const IMG_FULL_DIR: &str = "assets/media/img/full";
pub const IMG_THUMBS_DIR: &str = "assets/media/img/thumbs";
pub const VIDEO_DIR: &str = "assets/media/video/720p";
pub const POSTERS_DIR: &str = "assets/media/video/posters";

/// Fatal errors: anything here aborts the run before or after the walk.
/// Per-file trouble never surfaces through this type.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("input path does not exist: {0}")]
    InputMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Counts for the completion summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub images: usize,
    pub videos: usize,
    pub failures: usize,
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct RunSummary {
    pub report: IngestReport,
    pub manifest_path: PathBuf,
}

/// A discovered, classified source file awaiting id derivation.
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    kind: MediaKind,
}

/// A candidate that claimed its id and is cleared to transform.
#[derive(Debug, Clone)]
struct Job {
    path: PathBuf,
    kind: MediaKind,
    id: String,
}

/// Run the whole pipeline: walk, transform, write the manifest.
pub fn run(config: &IngestConfig) -> Result<RunSummary, IngestError> {
    if !config.input_root.exists() {
        return Err(IngestError::InputMissing(config.input_root.clone()));
    }

    // All four subdirectories exist after a run, even when empty.
    for dir in [IMG_FULL_DIR, IMG_THUMBS_DIR, VIDEO_DIR, POSTERS_DIR] {
        fs::create_dir_all(config.output_root.join(dir))?;
    }

    let candidates = discover(config);
    let (jobs, id_failures) = assign_ids(candidates);
    let results = process_all(config, &jobs)?;

    let mut report = IngestReport {
        failures: id_failures,
        ..IngestReport::default()
    };
    let mut items: Vec<MediaItem> = Vec::with_capacity(results.len());

    for (_path, _kind, result) in results {
        match result {
            Ok(item) => {
                match item.kind {
                    MediaKind::Image => report.images += 1,
                    MediaKind::Video => report.videos += 1,
                }
                items.push(item);
            }
            Err(_) => report.failures += 1,
        }
    }

    let manifest_path = manifest::write_manifest(items, &config.output_root)?;
    Ok(RunSummary {
        report,
        manifest_path,
    })
}

/// Walk the input tree and keep everything that survives the exclusion
/// filter and classifies as media. Unreadable entries and unrecognized
/// extensions are skipped silently.
fn discover(config: &IngestConfig) -> Vec<Candidate> {
    WalkDir::new(&config.input_root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !config.excludes.is_excluded(entry.path()))
        .filter_map(|entry| {
            let kind = MediaKind::classify(entry.path())?;
            Some(Candidate {
                path: entry.into_path(),
                kind,
            })
        })
        .collect()
}

/// Derive every candidate's id up front and resolve collisions before any
/// transform runs. The first file to claim an id wins; later claimants are
/// logged and dropped here, so their transforms never execute and (with
/// `--force`) never re-encode over the winner's outputs. An unreadable
/// source fails id derivation and counts as a per-file failure.
fn assign_ids(candidates: Vec<Candidate>) -> (Vec<Job>, usize) {
    let mut jobs: Vec<Job> = Vec::with_capacity(candidates.len());
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut failures = 0;

    for c in candidates {
        match identity::derive_id(&c.path) {
            Ok(id) => {
                if !seen_ids.insert(id.clone()) {
                    println!("{}", output::format_duplicate(&c.path, &id));
                    continue;
                }
                jobs.push(Job {
                    path: c.path,
                    kind: c.kind,
                    id,
                });
            }
            Err(err) => {
                let err = TransformError::from(err);
                println!("{}", output::format_failure(c.kind, &c.path, &err));
                failures += 1;
            }
        }
    }

    (jobs, failures)
}

type FileResult = (PathBuf, MediaKind, Result<MediaItem, TransformError>);

/// Transform every job, in input order.
///
/// Sequential mode prints each failure as it happens; parallel mode collects
/// first and prints afterwards so diagnostics stay in discovery order.
fn process_all(config: &IngestConfig, jobs: &[Job]) -> Result<Vec<FileResult>, IngestError> {
    if config.threads <= 1 {
        return Ok(jobs
            .iter()
            .map(|job| {
                let result = process_one(config, job);
                if let Err(err) = &result {
                    println!("{}", output::format_failure(job.kind, &job.path, err));
                }
                (job.path.clone(), job.kind, result)
            })
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let results: Vec<FileResult> = pool.install(|| {
        jobs.par_iter()
            .map(|job| (job.path.clone(), job.kind, process_one(config, job)))
            .collect()
    });
    for (path, kind, result) in &results {
        if let Err(err) = result {
            println!("{}", output::format_failure(*kind, path, err));
        }
    }
    Ok(results)
}

/// Transform one source file and build its manifest entry.
fn process_one(config: &IngestConfig, job: &Job) -> Result<MediaItem, TransformError> {
    let id = job.id.clone();

    let (src, thumb) = match job.kind {
        MediaKind::Image => {
            let src = format!("{IMG_FULL_DIR}/{id}.webp");
            let thumb = format!("{IMG_THUMBS_DIR}/{id}.webp");
            imaging::transform_image(
                &job.path,
                &config.output_root.join(&src),
                &config.output_root.join(&thumb),
                &config.image,
                config.force,
            )?;
            (src, thumb)
        }
        MediaKind::Video => {
            let src = format!("{VIDEO_DIR}/{id}.mp4");
            let thumb = format!("{POSTERS_DIR}/{id}.jpg");
            video::transform_video(
                &job.path,
                &config.output_root.join(&src),
                &config.output_root.join(&thumb),
                &config.video,
                config.ffmpeg.as_deref(),
                config.force,
            )?;
            (src, thumb)
        }
    };

    Ok(MediaItem {
        id,
        kind: job.kind,
        src,
        thumb,
        date: file_date(&job.path),
        caption: String::new(),
        hidden: false,
    })
}

/// Source mtime as a local-time ISO-8601 string; an unreadable timestamp is
/// a null date, not a failure.
fn file_date(path: &Path) -> Option<String> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%dT%H:%M:%S").to_string())
}
