// Corresponds to the inference path of c-blosc2/plugins/tuners/btune/btune.c
// (the `BTUNE_MODEL_BALANCED`/`BTUNE_MODEL_HCR`/`BTUNE_MODEL_HSP` metadata
// files and the tensor-model lookup they feed) and to
// blosc2_entropy_prober.c's use inside btune's first-chunk inference.
//
// The actual tensor runtime is out of scope; `ModelPredictor` is the seam a
// real one would plug into. The default implementation is a small
// nearest-centroid classifier driven by the same (cratio, cspeed) summary
// statistics the metadata file carries.

use std::fmt;
use std::fs;

use serde::Deserialize;

use crate::blosc::entropy_probe::probe_block;

/// Failure modes of the inference path. None of these abort compression;
/// callers fall back to the codec list's default ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    MetadataUnavailable,
    MetadataUnreadable(String),
    MetadataMalformed(String),
    PredictorUnavailable,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MetadataUnavailable => write!(f, "btune model metadata not configured"),
            ModelError::MetadataUnreadable(path) => {
                write!(f, "could not read btune model metadata at {}", path)
            }
            ModelError::MetadataMalformed(msg) => {
                write!(f, "malformed btune model metadata: {}", msg)
            }
            ModelError::PredictorUnavailable => write!(f, "no predictor registered for category"),
        }
    }
}

impl std::error::Error for ModelError {}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Stat {
    pub mean: f32,
    pub std: f32,
    pub min: f32,
    pub max: f32,
}

impl Stat {
    /// `((x - mean) / std - min) / max`, per the metadata-driven
    /// normalization the inferencer applies to each block's raw
    /// (cratio, cspeed) feature before it is handed to the predictor.
    fn normalize(&self, x: f32) -> f32 {
        let std = if self.std != 0.0 { self.std } else { 1.0 };
        let max = if self.max != 0.0 { self.max } else { 1.0 };
        ((x - self.mean) / std - self.min) / max
    }

    /// Inverse of [`Stat::normalize`].
    fn denormalize(&self, n: f32) -> f32 {
        let std = if self.std != 0.0 { self.std } else { 1.0 };
        let max = if self.max != 0.0 { self.max } else { 1.0 };
        (n * max + self.min) * std + self.mean
    }
}

/// The JSON document pointed to by BTUNE_MODEL_BALANCED / _HCR / _HSP: the
/// normalization statistics and the (codec, filter) category table the
/// predictor votes among.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMetadata {
    pub cratio: Stat,
    pub speed: Stat,
    /// category index -> (codec, filter) pair, following `codec_list`'s
    /// ordering in btune.c.
    pub categories: Vec<(i32, u8)>,
}

impl ModelMetadata {
    pub fn from_path(path: &str) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path)
            .map_err(|_| ModelError::MetadataUnreadable(path.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ModelError::MetadataMalformed(e.to_string()))
    }

    fn normalize(&self, cratio: f32, cspeed: f32) -> (f32, f32) {
        (self.cratio.normalize(cratio), self.speed.normalize(cspeed))
    }
}

/// The tensor-model interpreter seam: given a normalized (cratio, cspeed)
/// pair, return the index of the predicted category.
pub trait ModelPredictor {
    fn predict(&self, cratio: f32, cspeed: f32) -> usize;
}

/// A lightweight nearest-centroid predictor: each category is represented by
/// its (cratio, cspeed) centroid (derived from the metadata's min/max per
/// category slot), and prediction is just closest-centroid-by-distance. This
/// is the default, testable stand-in for the real tensor model.
pub struct NearestCentroidPredictor {
    centroids: Vec<(f32, f32)>,
}

impl NearestCentroidPredictor {
    pub fn from_metadata(metadata: &ModelMetadata) -> Self {
        let n = metadata.categories.len().max(1);
        let centroids = (0..n)
            .map(|i| {
                let frac = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
                let c = metadata.cratio.min + frac * (metadata.cratio.max - metadata.cratio.min);
                let s = metadata.speed.max - frac * (metadata.speed.max - metadata.speed.min);
                (c, s)
            })
            .collect();
        NearestCentroidPredictor { centroids }
    }
}

impl ModelPredictor for NearestCentroidPredictor {
    fn predict(&self, cratio: f32, cspeed: f32) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;
        for (idx, &(c, s)) in self.centroids.iter().enumerate() {
            let dc = cratio - c;
            let ds = cspeed - s;
            let dist = dc * dc + ds * ds;
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        best_idx
    }
}

/// Run the first-chunk inference flow: probe each never-split block of
/// `src` with the entropy probe, normalize each block's (cratio, cspeed)
/// against the metadata, predict its category, and return the (codec,
/// filter) pair with the most votes.
///
/// Returns `Err` when metadata is unavailable or malformed; callers should
/// fall back to the codec list's first entry in that case.
pub fn model_inference(
    metadata_path: Option<&str>,
    src: &[u8],
    blocksize: usize,
) -> Result<(i32, u8), ModelError> {
    let path = metadata_path.ok_or(ModelError::MetadataUnavailable)?;
    let metadata = ModelMetadata::from_path(path)?;
    if metadata.categories.is_empty() {
        return Err(ModelError::PredictorUnavailable);
    }
    let predictor = NearestCentroidPredictor::from_metadata(&metadata);

    let blocksize = blocksize.max(1);
    let mut votes = vec![0u32; metadata.categories.len()];
    for chunk in src.chunks(blocksize) {
        let instr = probe_block(chunk);
        let (nc, ns) = metadata.normalize(instr.cratio, instr.cspeed);
        let category = predictor.predict(nc, ns).min(votes.len() - 1);
        votes[category] += 1;
    }

    let winner = votes
        .iter()
        .enumerate()
        .max_by_key(|&(_, count)| *count)
        .map(|(idx, _)| idx)
        .ok_or(ModelError::PredictorUnavailable)?;

    Ok(metadata.categories[winner])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_denormalize_round_trips() {
        let stats = [
            Stat { mean: 0.0, std: 1.0, min: 0.0, max: 1.0 },
            Stat { mean: 3.5, std: 2.0, min: -1.0, max: 4.0 },
            Stat { mean: -10.0, std: 0.25, min: 0.5, max: 0.1 },
        ];
        for stat in stats {
            for x in [-5.0f32, 0.0, 1.0, 3.3, 42.0] {
                let n = stat.normalize(x);
                let back = stat.denormalize(n);
                assert!((back - x).abs() < 1e-2, "{} != {}", back, x);
            }
        }
    }

    #[test]
    fn model_inference_without_metadata_path_fails() {
        let err = model_inference(None, &[0u8; 64], 16).unwrap_err();
        assert_eq!(err, ModelError::MetadataUnavailable);
    }
}
