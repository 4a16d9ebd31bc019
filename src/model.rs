// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Hand-landmark model loading and inference.
//!
//! This module provides [`HandLandmarkModel`], an ONNX Runtime backed
//! [`LandmarkDetector`], and [`OnnxDetectorFactory`], which builds it lazily
//! for a session. Without the `onnx` feature the factory reports the
//! capability as unavailable.

use std::path::{Path, PathBuf};

use crate::detector::{DetectorFactory, LandmarkDetector};
use crate::error::Result;
use crate::inference::InferenceConfig;

#[cfg(feature = "onnx")]
pub use onnx::HandLandmarkModel;

/// Default model file name.
pub const DEFAULT_MODEL: &str = "hand_landmark.onnx";

/// Builds a [`HandLandmarkModel`] from a model file on first use.
#[derive(Debug, Clone)]
pub struct OnnxDetectorFactory {
    path: PathBuf,
    config: InferenceConfig,
}

impl OnnxDetectorFactory {
    /// Factory for the model at `path` with default configuration.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, InferenceConfig::default())
    }

    /// Factory for the model at `path` with custom configuration.
    #[must_use]
    pub fn with_config<P: AsRef<Path>>(path: P, config: InferenceConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Path of the model file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DetectorFactory for OnnxDetectorFactory {
    #[cfg(feature = "onnx")]
    fn create(&self) -> Result<Box<dyn LandmarkDetector>> {
        let model = HandLandmarkModel::load_with_config(&self.path, self.config.clone())?;
        Ok(Box::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    fn create(&self) -> Result<Box<dyn LandmarkDetector>> {
        Err(crate::error::InferenceError::FeatureNotEnabled(format!(
            "cannot load {}: built without the 'onnx' feature",
            self.path.display()
        )))
    }
}

#[cfg(feature = "onnx")]
mod onnx {
    use std::path::Path;
    use std::time::Instant;

    use image::DynamicImage;
    use ort::session::Session;
    use ort::session::builder::GraphOptimizationLevel;
    use ort::value::TensorRef;

    use crate::detector::LandmarkDetector;
    use crate::error::{InferenceError, Result};
    use crate::inference::InferenceConfig;
    use crate::landmarks::LandmarkSet;
    use crate::postprocessing::postprocess;
    use crate::preprocessing::preprocess_image;

    /// Hand-landmark network running on ONNX Runtime.
    ///
    /// Expects an NHWC `[1, H, W, 3]` float input in [0, 1] and produces a
    /// 63-value landmark tensor plus a hand-presence logit.
    pub struct HandLandmarkModel {
        /// ONNX Runtime session.
        session: Session,
        /// Input tensor name.
        input_name: String,
        /// Output tensor names, in session order.
        output_names: Vec<String>,
        /// Inference configuration.
        config: InferenceConfig,
        /// Whether the previous frame contained a hand.
        tracking: bool,
    }

    impl HandLandmarkModel {
        /// Load a model with the given configuration.
        ///
        /// # Errors
        ///
        /// Returns an error if the configuration is invalid, the model file
        /// doesn't exist, or ONNX Runtime can't build a session.
        pub fn load_with_config<P: AsRef<Path>>(path: P, config: InferenceConfig) -> Result<Self> {
            let path = path.as_ref();
            config.validate()?;

            if !path.exists() {
                return Err(InferenceError::ModelLoadError(format!(
                    "Model file not found: {}",
                    path.display()
                )));
            }

            let session = Session::builder()
                .map_err(|e| InferenceError::ModelLoadError(format!("Failed to create session builder: {e}")))?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .map_err(|e| InferenceError::ModelLoadError(format!("Failed to set optimization level: {e}")))?
                .with_intra_threads(config.num_threads)
                .map_err(|e| InferenceError::ModelLoadError(format!("Failed to set intra-thread count: {e}")))?
                .commit_from_file(path)
                .map_err(|e| InferenceError::ModelLoadError(format!("Failed to load model: {e}")))?;

            let input_name = session
                .inputs
                .first()
                .map(|i| i.name.clone())
                .ok_or_else(|| InferenceError::ModelLoadError("Model has no inputs".to_string()))?;

            let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

            crate::verbose!(
                "Loaded hand-landmark model {} ({} outputs)",
                path.display(),
                output_names.len()
            );

            Ok(Self {
                session,
                input_name,
                output_names,
                config,
                tracking: false,
            })
        }

        /// Run the ONNX model and collect every output as (data, shape).
        fn run_inference(&mut self, input: &ndarray::Array4<f32>) -> Result<Vec<(Vec<f32>, Vec<usize>)>> {
            let input_contiguous = input.as_standard_layout();

            let input_tensor = TensorRef::from_array_view(&input_contiguous)
                .map_err(|e| InferenceError::InferenceError(format!("Failed to create input tensor: {e}")))?;

            let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

            let outputs = self
                .session
                .run(inputs)
                .map_err(|e| InferenceError::InferenceError(format!("Inference failed: {e}")))?;

            let mut collected = Vec::with_capacity(self.output_names.len());
            for name in &self.output_names {
                let output = outputs
                    .get(name.as_str())
                    .ok_or_else(|| InferenceError::InferenceError(format!("Output '{name}' not found")))?;

                let (shape, data) = output
                    .try_extract_tensor::<f32>()
                    .map_err(|e| InferenceError::InferenceError(format!("Failed to extract output: {e}")))?;

                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let shape_vec: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
                collected.push((data.to_vec(), shape_vec));
            }

            Ok(collected)
        }
    }

    impl LandmarkDetector for HandLandmarkModel {
        fn detect(&mut self, image: &DynamicImage) -> Result<Option<LandmarkSet>> {
            let start = Instant::now();
            let preprocess = preprocess_image(image, self.config.imgsz)?;
            let outputs = self.run_inference(&preprocess.tensor)?;

            let threshold = self.config.presence_threshold(self.tracking);
            let hand = postprocess(&outputs, &preprocess, threshold)?;
            self.tracking = hand.is_some();

            crate::verbose!(
                "hand={} in {:.1}ms",
                hand.is_some(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            Ok(hand)
        }

        fn reset(&mut self) {
            self.tracking = false;
        }
    }

    impl std::fmt::Debug for HandLandmarkModel {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("HandLandmarkModel")
                .field("input_name", &self.input_name)
                .field("output_names", &self.output_names)
                .field("imgsz", &self.config.imgsz)
                .field("tracking", &self.tracking)
                .finish()
        }
    }
}
