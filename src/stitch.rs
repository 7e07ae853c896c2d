//! Invoke the system `ffmpeg` binary to stitch a persisted PNG sequence into
//! an MP4.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::{BounceError, BounceResult};

#[derive(Clone, Debug)]
pub struct StitchConfig {
    pub fps: u32,
    /// printf-style input pattern, e.g. `output/goldfish/%04d.png`.
    pub pattern: PathBuf,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl StitchConfig {
    pub fn validate(&self) -> BounceResult<()> {
        if self.fps == 0 {
            return Err(BounceError::config("stitch fps must be non-zero"));
        }
        if self.pattern.as_os_str().is_empty() {
            return Err(BounceError::config("stitch input pattern must be set"));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(BounceError::config("stitch output path must be set"));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> BounceResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            BounceError::io(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Run the stitch. Uses the system `ffmpeg` binary rather than linking FFmpeg
/// libraries, which keeps the build free of native dev headers.
pub fn stitch_frames(cfg: &StitchConfig) -> BounceResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    if !cfg.overwrite && cfg.out_path.exists() {
        return Err(BounceError::config(format!(
            "output file '{}' already exists",
            cfg.out_path.display()
        )));
    }

    if !is_ffmpeg_on_path() {
        return Err(BounceError::external(
            "ffmpeg is required for MP4 stitching, but was not found on PATH",
        ));
    }

    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    if cfg.overwrite {
        cmd.arg("-y");
    } else {
        cmd.arg("-n");
    }

    cmd.args(["-loglevel", "error", "-framerate", &cfg.fps.to_string(), "-i"])
        .arg(&cfg.pattern)
        .args([
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

    tracing::info!(
        fps = cfg.fps,
        "stitching '{}' into '{}'",
        cfg.pattern.display(),
        cfg.out_path.display()
    );

    let output = cmd.output().map_err(|e| {
        BounceError::external(format!(
            "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BounceError::external(format!(
            "ffmpeg exited with status {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}
