use crate::dataset::build_training_set;
use crate::face::FaceDetector;
use crate::lbph::{LbphModel, LbphParams};
use crate::Result;
use std::fs;
use std::path::Path;
use tracing::info;

/// Retrain the recognizer on every crop in `dataset_dir` and overwrite the
/// model stored at `model_path`.
///
/// There is no incremental path: the model is rebuilt from the whole
/// directory each time, so the saved file always matches the crops on disk.
pub fn retrain(
    dataset_dir: &Path,
    model_path: &Path,
    detector: &mut dyn FaceDetector,
    params: LbphParams,
) -> Result<LbphModel> {
    let set = build_training_set(dataset_dir, detector)?;
    let model = LbphModel::train(&set, params)?;
    if let Some(parent) = model_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    model.save(model_path)?;
    info!(
        samples = model.len(),
        path = %model_path.display(),
        "recognizer trained"
    );
    Ok(model)
}
