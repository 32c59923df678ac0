//! Per-column min-max normalization.
//!
//! A [`Normalizer`] starts unfitted. `fit` needs `&mut self`; once fitted, the
//! value is only read (`transform` / `inverse_transform` take `&self`), so it
//! can be shared freely between the preprocessing and decoding stages. The
//! parameters used to scale training data must be the ones used to unscale
//! generated data; callers thread the same value through both.

use nalgebra::DMatrix;

use crate::error::PipelineError;

/// Fitted per-column extrema.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxParams {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
}

impl MinMaxParams {
    fn range(&self, j: usize) -> f64 {
        self.data_max[j] - self.data_min[j]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalizer {
    params: Option<MinMaxParams>,
}

impl Normalizer {
    /// An unfitted normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    /// Number of columns the normalizer was fit on.
    pub fn width(&self) -> Option<usize> {
        self.params.as_ref().map(|p| p.data_min.len())
    }

    pub fn params(&self) -> Result<&MinMaxParams, PipelineError> {
        self.params.as_ref().ok_or(PipelineError::Precomposition)
    }

    /// Record the min and max of every column of `x`, replacing any previous fit.
    pub fn fit(&mut self, x: &DMatrix<f64>) -> Result<(), PipelineError> {
        if x.nrows() == 0 {
            return Err(PipelineError::EmptyDataset);
        }

        let mut data_min = Vec::with_capacity(x.ncols());
        let mut data_max = Vec::with_capacity(x.ncols());
        for col in x.column_iter() {
            data_min.push(col.min());
            data_max.push(col.max());
        }

        tracing::debug!(columns = x.ncols(), rows = x.nrows(), "fitted min-max normalizer");
        self.params = Some(MinMaxParams { data_min, data_max });
        Ok(())
    }

    /// Scale each column to [0, 1] using the fitted extrema.
    ///
    /// Columns with zero variance scale to exactly 0.
    pub fn transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        let params = self.params()?;
        check_width(params, x)?;

        let mut out = x.clone();
        for (j, mut col) in out.column_iter_mut().enumerate() {
            let min = params.data_min[j];
            let range = params.range(j);
            col.apply(|v| *v = if range > 0.0 { (*v - min) / range } else { 0.0 });
        }
        Ok(out)
    }

    pub fn fit_transform(&mut self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Map scaled values back to the original column ranges.
    pub fn inverse_transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        let params = self.params()?;
        check_width(params, x)?;

        let mut out = x.clone();
        for (j, mut col) in out.column_iter_mut().enumerate() {
            let min = params.data_min[j];
            let range = params.range(j);
            col.apply(|v| *v = *v * range + min);
        }
        Ok(out)
    }
}

fn check_width(params: &MinMaxParams, x: &DMatrix<f64>) -> Result<(), PipelineError> {
    let expected = params.data_min.len();
    if x.ncols() != expected {
        return Err(PipelineError::SchemaMismatch(format!(
            "normalizer was fit on {expected} columns, got {}",
            x.ncols()
        )));
    }
    Ok(())
}
