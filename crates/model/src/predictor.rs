//! The opaque prediction contract.

use pricecast_core::{Error, FeatureSchema, FeatureVector, Result};

/// Interface for single-value price predictors.
///
/// The forecast loop treats an implementation as opaque: one feature vector
/// in, one price out, no visibility into model internals. Predictions must
/// be deterministic and side-effect-free; the same vector always yields the
/// same price. Implementations declare the feature shape they were trained
/// on, and callers must verify compatibility rather than assume it.
pub trait Predictor: Send + Sync {
    /// Predict the next closing price from one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// The feature shape this predictor was trained on.
    fn schema(&self) -> FeatureSchema;

    /// Get predictor name/type.
    fn name(&self) -> &str;

    /// Verify a feature vector against the declared shape.
    ///
    /// Rejects both a wrong schema tag and a right tag with the wrong
    /// number of values.
    fn verify_features(&self, features: &FeatureVector) -> Result<()> {
        let expected = self.schema();
        if features.schema != expected || features.len() != expected.arity() {
            return Err(Error::shape_mismatch(
                expected.shape_label(),
                features.shape_label(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPredictor;

    impl Predictor for FixedPredictor {
        fn predict(&self, features: &FeatureVector) -> Result<f64> {
            self.verify_features(features)?;
            Ok(42.0)
        }

        fn schema(&self) -> FeatureSchema {
            FeatureSchema::Calendar
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_verify_accepts_matching_shape() {
        let predictor = FixedPredictor;
        let vector = FeatureVector::new(FeatureSchema::Calendar, vec![15.0, 6.0, 2024.0]);
        assert_eq!(predictor.predict(&vector).unwrap(), 42.0);
    }

    #[test]
    fn test_verify_rejects_wrong_schema_tag() {
        let predictor = FixedPredictor;
        let vector = FeatureVector::new(FeatureSchema::Indicator, vec![0.0; 11]);
        let err = predictor.predict(&vector).unwrap_err();
        assert!(matches!(err, Error::FeatureShapeMismatch { .. }));
    }

    #[test]
    fn test_verify_rejects_wrong_arity() {
        let predictor = FixedPredictor;
        let vector = FeatureVector::new(FeatureSchema::Calendar, vec![15.0, 6.0]);
        let err = predictor.predict(&vector).unwrap_err();
        assert!(matches!(err, Error::FeatureShapeMismatch { .. }));
    }
}
