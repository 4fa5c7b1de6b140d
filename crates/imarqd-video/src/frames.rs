//! Listing and parallel per-frame embedding (`spec.md` §5 concurrency model).

use std::path::{Path, PathBuf};

use imarqd_core::ImageCodecConfig;
use tracing::instrument;

use crate::error::VideoError;

/// Lists `frame_*.png` files under `dir` in ascending filename order, which
/// is ascending frame index order by construction (`frame_%08d.png`).
pub fn list_frame_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut frames: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("frame_") && n.ends_with(".png"))
        })
        .collect();
    frames.sort();
    Ok(frames)
}

/// Embeds `payload_bits` into every `frame_step`th frame of `frame_paths`,
/// copying the rest verbatim into `marked_dir`, using a bounded thread pool.
///
/// Frame order is immaterial to worker scheduling: every worker writes to a
/// filename derived from its own frame's index, so completion order cannot
/// scramble the sequence the final re-encode reads back (`spec.md` §5).
#[instrument(skip(frame_paths, payload_bits, cfg))]
pub fn embed_on_stride(
    frame_paths: &[PathBuf],
    marked_dir: &Path,
    payload_bits: &[bool],
    cfg: &ImageCodecConfig,
    frame_step: u32,
) -> Result<usize, VideoError> {
    std::fs::create_dir_all(marked_dir)?;
    let step = frame_step.max(1) as usize;

    let worker_count = std::thread::available_parallelism().map(std::num::NonZeroUsize::get).unwrap_or(1).min(frame_paths.len().max(1));

    let marked_count = std::thread::scope(|scope| -> Result<usize, VideoError> {
        let mut handles = Vec::with_capacity(worker_count);
        for worker in 0..worker_count {
            let frame_paths = frame_paths;
            let marked_dir = marked_dir;
            handles.push(scope.spawn(move || -> Result<usize, VideoError> {
                let mut marked = 0usize;
                for (idx, src) in frame_paths.iter().enumerate() {
                    if idx % worker_count != worker {
                        continue;
                    }
                    let dst = marked_dir.join(src.file_name().expect("frame path has a file name"));
                    if idx % step == 0 {
                        imarqd_core::embed_image(src, &dst, payload_bits, cfg)?;
                        marked += 1;
                    } else {
                        std::fs::copy(src, &dst)?;
                    }
                }
                Ok(marked)
            }));
        }

        let mut total = 0usize;
        for handle in handles {
            total += handle.join().expect("embed worker thread panicked")?;
        }
        Ok(total)
    })?;

    Ok(marked_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_frame_files_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("frame_00000002.png"), b"x").unwrap();
        std::fs::write(dir.path().join("frame_00000001.png"), b"x").unwrap();
        std::fs::write(dir.path().join("not_a_frame.txt"), b"x").unwrap();

        let frames = list_frame_files(dir.path()).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].ends_with("frame_00000001.png"));
        assert!(frames[1].ends_with("frame_00000002.png"));
    }
}
