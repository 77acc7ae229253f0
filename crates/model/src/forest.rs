//! Random forest predictor backed by a serialized model manifest.

use crate::predictor::Predictor;
use pricecast_core::{Error, FeatureSchema, FeatureVector, Result};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// The concrete forest type persisted in manifests.
pub type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// On-disk model artifact: the fitted forest plus the feature layout it was
/// trained against.
///
/// The redundant `feature_names` list guards against a manifest whose schema
/// tag and actual training columns have drifted apart.
#[derive(Serialize, Deserialize)]
pub struct ModelManifest {
    /// Feature layout the forest was fitted with.
    pub schema: FeatureSchema,
    /// Column names in training order.
    pub feature_names: Vec<String>,
    /// The fitted forest.
    pub model: Forest,
}

impl ModelManifest {
    /// Wrap a fitted forest with its layout's canonical column names.
    pub fn new(schema: FeatureSchema, model: Forest) -> Self {
        Self {
            schema,
            feature_names: schema
                .feature_names()
                .iter()
                .map(|n| n.to_string())
                .collect(),
            model,
        }
    }

    /// Write the manifest as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer(file, self)?;
        Ok(())
    }
}

/// Random forest price predictor.
#[derive(Debug)]
pub struct ForestPredictor {
    schema: FeatureSchema,
    model: Forest,
}

impl ForestPredictor {
    /// Load a predictor from a JSON manifest file.
    ///
    /// Any failure along the way, missing file, malformed JSON, or a layout
    /// mismatch inside the manifest, reports the predictor as unavailable
    /// rather than producing a predictor that cannot be trusted.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::predictor_unavailable(format!("failed to open {}: {}", path.display(), e))
        })?;
        let predictor = Self::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} predictor from {}",
            predictor.schema.shape_label(),
            path.display()
        );
        Ok(predictor)
    }

    /// Load a predictor from any JSON manifest reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let manifest: ModelManifest = serde_json::from_reader(reader).map_err(|e| {
            Error::predictor_unavailable(format!("failed to parse model manifest: {}", e))
        })?;
        Self::from_manifest(manifest)
    }

    /// Build a predictor from a parsed manifest, checking that its column
    /// names match the canonical names of its declared layout.
    pub fn from_manifest(manifest: ModelManifest) -> Result<Self> {
        let expected = manifest.schema.feature_names();
        let matches = manifest.feature_names.len() == expected.len()
            && manifest
                .feature_names
                .iter()
                .zip(expected)
                .all(|(name, canonical)| name.as_str() == *canonical);
        if !matches {
            return Err(Error::predictor_unavailable(format!(
                "manifest columns {:?} do not match {} layout",
                manifest.feature_names,
                manifest.schema.shape_label()
            )));
        }
        Ok(Self {
            schema: manifest.schema,
            model: manifest.model,
        })
    }

    /// Fit a forest on training rows with default forest parameters.
    pub fn fit(schema: FeatureSchema, rows: &[Vec<f64>], targets: &[f64]) -> Result<Self> {
        let x = DenseMatrix::from_2d_vec(&rows.to_vec())
            .map_err(|e| Error::model(format!("training matrix: {}", e)))?;
        let y = targets.to_vec();
        let model = RandomForestRegressor::fit(&x, &y, RandomForestRegressorParameters::default())
            .map_err(|e| Error::model(format!("training failed: {}", e)))?;
        Ok(Self { schema, model })
    }

    /// Convert back into a manifest for persistence.
    pub fn into_manifest(self) -> ModelManifest {
        ModelManifest::new(self.schema, self.model)
    }
}

impl Predictor for ForestPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        self.verify_features(features)?;

        let matrix = DenseMatrix::from_2d_vec(&vec![features.values.clone()])
            .map_err(|e| Error::model(format!("matrix creation failed: {}", e)))?;
        let predictions = self
            .model
            .predict(&matrix)
            .map_err(|e| Error::model(format!("prediction failed: {}", e)))?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| Error::model("no prediction returned"))
    }

    fn schema(&self) -> FeatureSchema {
        self.schema
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}
