use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::compose::shadow::Shadow;
use crate::compose::walk::WalkCycle;
use crate::foundation::core::Canvas;
use crate::foundation::error::{WalkError, WalkResult};
use crate::segment::BackgroundKey;

/// One named character and the sprite sheet it is cut from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpriteSource {
    pub name: String,
    pub path: PathBuf,
}

impl SpriteSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Optional packed sheet of every produced walk frame.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// File stem for `{stem}.png` / `{stem}.json`.
    pub stem: String,
    pub columns: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            stem: "walk-atlas".to_string(),
            columns: 4,
        }
    }
}

/// Everything the batch driver needs. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub canvas: Canvas,
    /// Sprite height after scaling, in pixels.
    pub target_height: u32,
    /// Transparent margin kept around the cropped content.
    pub padding: u32,
    pub background: BackgroundKey,
    pub walk: WalkCycle,
    pub shadow: Shadow,
    pub output_dir: PathBuf,
    pub sources: Vec<SpriteSource>,
    pub parallel: bool,
    pub threads: Option<usize>,
    pub atlas: Option<AtlasConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            target_height: 30,
            padding: 2,
            background: BackgroundKey::default(),
            walk: WalkCycle::default(),
            shadow: Shadow::default(),
            output_dir: PathBuf::from("out"),
            sources: Vec::new(),
            parallel: false,
            threads: None,
            atlas: None,
        }
    }
}

impl PipelineConfig {
    /// Parse a config from a JSON reader. Paths are left as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> WalkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WalkError::validation(format!("parse pipeline config JSON: {e}")))
    }

    /// Parse a config file; relative source and output paths resolve against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> WalkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WalkError::validation(format!("open pipeline config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_relative_to(root);
        Ok(cfg)
    }

    /// Rebase relative paths onto `root`.
    pub fn resolve_relative_to(&mut self, root: &Path) {
        if self.output_dir.is_relative() {
            self.output_dir = root.join(&self.output_dir);
        }
        for src in &mut self.sources {
            if src.path.is_relative() {
                src.path = root.join(&src.path);
            }
        }
    }

    pub fn validate(&self) -> WalkResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.target_height == 0 {
            return Err(WalkError::validation("target_height must be > 0"));
        }
        self.walk.validate()?;

        let mut seen = BTreeSet::new();
        for src in &self.sources {
            if src.name.is_empty() {
                return Err(WalkError::validation("source name must not be empty"));
            }
            if src.name.contains(['/', '\\']) || src.name == "." || src.name == ".." {
                return Err(WalkError::validation(format!(
                    "source name '{}' must be a plain file name",
                    src.name
                )));
            }
            if !seen.insert(src.name.as_str()) {
                return Err(WalkError::validation(format!(
                    "duplicate source name '{}'",
                    src.name
                )));
            }
        }

        if let Some(n) = self.threads
            && n == 0
        {
            return Err(WalkError::validation("threads must be >= 1 when set"));
        }
        if let Some(atlas) = &self.atlas {
            if atlas.columns == 0 {
                return Err(WalkError::validation("atlas columns must be > 0"));
            }
            if atlas.stem.is_empty() {
                return Err(WalkError::validation("atlas stem must not be empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
