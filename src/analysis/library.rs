//! Candidate photo indexing
//!
//! Every candidate path is decoded once, downscaled to a bounded
//! thumbnail, and color-profiled. Decoding is embarrassingly parallel and
//! fans out on the rayon pool; all correctness-relevant bookkeeping
//! happens after the parallel phase, in input order.

use crate::algorithm::control::{
    CancellationToken, GenerationStage, ProgressSender, StageOutcome, percent_of,
};
use crate::analysis::color::{ColorAccumulator, MeanColor};
use crate::io::configuration::THUMBNAIL_MAX_SIDE;
use crate::io::error::{MosaicError, Result};
use image::RgbImage;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Aspect classification of a candidate photo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectClass {
    /// Width equals height
    Square,
    /// Wider than tall
    Landscape,
    /// Taller than wide
    Portrait,
}

/// One successfully indexed candidate photo
#[derive(Debug, Clone)]
pub struct CellPhoto {
    /// Stable discovery index among surviving candidates
    pub index: usize,
    /// Source path of the photo
    pub path: PathBuf,
    /// Decoded thumbnail bounded to the configured maximum side
    pub thumbnail: RgbImage,
    /// Mean color over the thumbnail
    pub average: MeanColor,
    /// Aspect classification
    pub aspect: AspectClass,
}

/// One selectable option: a photo rendered plain or mirrored
///
/// A mirrored variant references the same pixel data and shares its mean
/// color; mirroring affects rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoVariant {
    /// Index into the library's photos
    pub photo: usize,
    /// Render the photo mirrored horizontally
    pub mirrored: bool,
}

/// Record of a candidate that failed to decode
///
/// Decode failures are non-fatal: the candidate is dropped from the pool
/// and generation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    /// Path of the failed candidate
    pub path: PathBuf,
    /// Decoder error message
    pub reason: String,
}

/// Indexed candidate pool for one generation run
#[derive(Debug, Clone, Default)]
pub struct PhotoLibrary {
    /// Surviving photos in discovery order
    pub photos: Vec<CellPhoto>,
    /// Selectable variants, ordered by photo then unmirrored-first
    ///
    /// This ordering realizes the selector's deterministic tie-break.
    pub variants: Vec<PhotoVariant>,
    /// Candidates dropped during decoding
    pub failures: Vec<DecodeFailure>,
}

impl PhotoLibrary {
    /// Decode, downsize, and color-profile every candidate path
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyCellPool`] when no candidate survives
    /// decoding. Individual decode failures are recorded, not raised.
    pub fn index_photos(
        paths: &[PathBuf],
        mirror_images: bool,
        token: &CancellationToken,
        progress: &ProgressSender,
    ) -> Result<StageOutcome<Self>> {
        let total = paths.len();
        let completed = AtomicUsize::new(0);

        // Token polled between candidates; a decode in flight completes
        let decoded: Vec<Option<std::result::Result<DecodedCandidate, DecodeFailure>>> = paths
            .par_iter()
            .map_with(progress.clone(), |sender, path| {
                if token.is_cancelled() {
                    return None;
                }
                let outcome = decode_candidate(path);
                let done = completed.fetch_add(1, AtomicOrdering::Relaxed) + 1;
                sender.report(GenerationStage::Indexing, percent_of(done, total));
                Some(outcome)
            })
            .collect();

        if token.is_cancelled() {
            return Ok(StageOutcome::Cancelled);
        }

        let mut photos = Vec::new();
        let mut failures = Vec::new();
        for entry in decoded.into_iter().flatten() {
            match entry {
                Ok(candidate) => {
                    photos.push(CellPhoto {
                        index: photos.len(),
                        path: candidate.path,
                        thumbnail: candidate.thumbnail,
                        average: candidate.average,
                        aspect: candidate.aspect,
                    });
                }
                Err(failure) => failures.push(failure),
            }
        }

        if photos.is_empty() {
            return Err(MosaicError::EmptyCellPool { attempted: total });
        }

        let variants = build_variants(photos.len(), mirror_images);
        progress.report(GenerationStage::Indexing, 100);

        Ok(StageOutcome::Completed(Self {
            photos,
            variants,
            failures,
        }))
    }

    /// Number of usable photos in the pool
    pub const fn photo_count(&self) -> usize {
        self.photos.len()
    }
}

/// Variant list ordered photo-by-photo, unmirrored before mirrored
fn build_variants(photo_count: usize, mirror_images: bool) -> Vec<PhotoVariant> {
    let mut variants = Vec::with_capacity(if mirror_images {
        photo_count * 2
    } else {
        photo_count
    });
    for photo in 0..photo_count {
        variants.push(PhotoVariant {
            photo,
            mirrored: false,
        });
        if mirror_images {
            variants.push(PhotoVariant {
                photo,
                mirrored: true,
            });
        }
    }
    variants
}

struct DecodedCandidate {
    path: PathBuf,
    thumbnail: RgbImage,
    average: MeanColor,
    aspect: AspectClass,
}

fn decode_candidate(path: &Path) -> std::result::Result<DecodedCandidate, DecodeFailure> {
    let decoded = image::open(path).map_err(|e| DecodeFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let thumbnail = decoded
        .thumbnail(THUMBNAIL_MAX_SIDE, THUMBNAIL_MAX_SIDE)
        .to_rgb8();

    let mut accumulator = ColorAccumulator::new();
    for pixel in thumbnail.pixels() {
        let channels = pixel.0;
        accumulator.add(channels[0], channels[1], channels[2]);
    }

    let aspect = match thumbnail.width().cmp(&thumbnail.height()) {
        Ordering::Greater => AspectClass::Landscape,
        Ordering::Less => AspectClass::Portrait,
        Ordering::Equal => AspectClass::Square,
    };

    Ok(DecodedCandidate {
        path: path.to_path_buf(),
        thumbnail,
        average: accumulator.mean(),
        aspect,
    })
}
