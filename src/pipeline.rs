use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::atlas::sheet::{SpriteSheet, TileSize};
use crate::compose::walk::compose_walk_frames;
use crate::config::{PipelineConfig, SpriteSource};
use crate::cutout::alpha::{crop_to_content, key_background};
use crate::cutout::scale::scale_to_height;
use crate::foundation::core::RasterImage;
use crate::foundation::error::{WalkError, WalkResult};

/// Deterministic name, without extension, for frame `index` of character `name`.
pub fn frame_stem(name: &str, index: usize) -> String {
    format!("{name}_walk_{index}")
}

/// Key, crop and scale a raw sprite sheet into a cutout ready for compositing.
pub fn prepare_sprite(src: &RasterImage, cfg: &PipelineConfig) -> WalkResult<RasterImage> {
    let keyed = key_background(src, &cfg.background)?;
    let cropped = crop_to_content(&keyed, cfg.padding);
    scale_to_height(&cropped, cfg.target_height)
}

/// Run every stage on one raw sprite and return the composited frames.
pub fn render_character(src: &RasterImage, cfg: &PipelineConfig) -> WalkResult<Vec<RasterImage>> {
    let sprite = prepare_sprite(src, cfg)?;
    compose_walk_frames(&sprite, cfg.canvas, &cfg.walk, &cfg.shadow)
}

/// Decode a configured source into RGBA8.
pub fn load_source(source: &SpriteSource) -> WalkResult<RasterImage> {
    if !source.path.exists() {
        return Err(WalkError::missing_source(&source.name, &source.path));
    }
    let img = image::open(&source.path)
        .with_context(|| format!("decode sprite '{}'", source.path.display()))?;
    Ok(img.to_rgba8())
}

/// Removes every tracked file on drop unless committed.
struct PartialOutputGuard {
    paths: Vec<PathBuf>,
    committed: bool,
}

impl PartialOutputGuard {
    fn new() -> Self {
        Self {
            paths: Vec::new(),
            committed: false,
        }
    }

    fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.paths)
    }
}

impl Drop for PartialOutputGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for path in self.paths.drain(..) {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Write all frames of one character, or none of them.
pub fn write_frames(dir: &Path, name: &str, frames: &[RasterImage]) -> WalkResult<Vec<PathBuf>> {
    let mut guard = PartialOutputGuard::new();
    for (i, frame) in frames.iter().enumerate() {
        let path = dir.join(format!("{}.png", frame_stem(name, i)));
        frame
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        guard.paths.push(path);
    }
    Ok(guard.commit())
}

/// Frames written for one character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterOutput {
    pub name: String,
    pub files: Vec<PathBuf>,
}

/// A character left out of the batch, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterIssue {
    pub name: String,
    pub reason: String,
}

/// Per-character results of a batch run, in source table order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: Vec<CharacterOutput>,
    /// Characters whose source file was missing.
    pub skipped: Vec<CharacterIssue>,
    /// Characters that failed while processing; none of their files remain.
    pub failed: Vec<CharacterIssue>,
    /// Packed sheet PNG and metadata JSON, when an atlas was configured.
    pub atlas: Option<(PathBuf, PathBuf)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }

    pub fn files_written(&self) -> usize {
        self.written.iter().map(|c| c.files.len()).sum()
    }

    pub fn summary(&self) -> String {
        let mut s = format!(
            "{} character(s) written ({} frames), {} skipped, {} failed",
            self.written.len(),
            self.files_written(),
            self.skipped.len(),
            self.failed.len()
        );
        for issue in &self.skipped {
            s.push_str(&format!("\n  skipped {}: {}", issue.name, issue.reason));
        }
        for issue in &self.failed {
            s.push_str(&format!("\n  failed {}: {}", issue.name, issue.reason));
        }
        s
    }
}

enum Outcome {
    Written {
        output: CharacterOutput,
        /// Only retained when an atlas will be packed.
        frames: Option<Vec<RasterImage>>,
    },
    Skipped(CharacterIssue),
    Failed(CharacterIssue),
}

#[tracing::instrument(skip_all, fields(name = %source.name))]
fn process_character(source: &SpriteSource, cfg: &PipelineConfig) -> Outcome {
    let result = load_source(source)
        .and_then(|raw| render_character(&raw, cfg))
        .and_then(|frames| {
            let files = write_frames(&cfg.output_dir, &source.name, &frames)?;
            Ok((frames, files))
        });

    match result {
        Ok((frames, files)) => {
            for f in &files {
                tracing::info!("wrote {}", f.display());
            }
            Outcome::Written {
                output: CharacterOutput {
                    name: source.name.clone(),
                    files,
                },
                frames: cfg.atlas.is_some().then_some(frames),
            }
        }
        Err(err) if err.is_skip() => {
            tracing::warn!("{err}, skipping");
            Outcome::Skipped(CharacterIssue {
                name: source.name.clone(),
                reason: err.to_string(),
            })
        }
        Err(err) => {
            tracing::warn!("processing failed: {err:#}");
            Outcome::Failed(CharacterIssue {
                name: source.name.clone(),
                reason: format!("{err:#}"),
            })
        }
    }
}

/// Process every configured character.
///
/// A missing or broken source only affects its own character; the batch always visits the
/// whole table. Errors are returned only for invalid configuration or when the output
/// directory (or the optional atlas) cannot be written.
#[tracing::instrument(skip_all, fields(sources = cfg.sources.len(), parallel = cfg.parallel))]
pub fn run_batch(cfg: &PipelineConfig) -> WalkResult<BatchReport> {
    cfg.validate()?;
    std::fs::create_dir_all(&cfg.output_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            cfg.output_dir.display()
        )
    })?;

    let outcomes: Vec<Outcome> = if cfg.parallel {
        let pool = build_thread_pool(cfg.threads)?;
        pool.install(|| {
            cfg.sources
                .par_iter()
                .map(|source| process_character(source, cfg))
                .collect()
        })
    } else {
        cfg.sources
            .iter()
            .map(|source| process_character(source, cfg))
            .collect()
    };

    let mut report = BatchReport::default();
    let mut sheet = match &cfg.atlas {
        Some(atlas) => Some(SpriteSheet::new(
            TileSize {
                w: cfg.canvas.width,
                h: cfg.canvas.height,
            },
            atlas.columns,
        )?),
        None => None,
    };

    for outcome in outcomes {
        match outcome {
            Outcome::Written { output, frames } => {
                if let (Some(sheet), Some(frames)) = (sheet.as_mut(), frames) {
                    for (i, frame) in frames.iter().enumerate() {
                        sheet.push_image(&frame_stem(&output.name, i), frame)?;
                    }
                }
                report.written.push(output);
            }
            Outcome::Skipped(issue) => report.skipped.push(issue),
            Outcome::Failed(issue) => report.failed.push(issue),
        }
    }

    if let (Some(sheet), Some(atlas)) = (sheet, &cfg.atlas)
        && !sheet.is_empty()
    {
        let paths = sheet.write(&cfg.output_dir, &atlas.stem)?;
        tracing::info!("wrote {}", paths.0.display());
        tracing::info!("wrote {}", paths.1.display());
        report.atlas = Some(paths);
    }

    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> WalkResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WalkError::validation("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WalkError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
