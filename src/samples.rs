use ndarray::{Array2, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix2, ShapeBuilder};

use crate::error::{RankError, Result};

/// Sampled outcomes, one row per alternative and one column per iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    values: Array2<f64>,
}

impl SampleMatrix {
    pub fn from_array(values: Array2<f64>) -> Result<Self> {
        if values.nrows() == 0 {
            return Err(RankError::InvalidDimension(
                "at least one alternative required".to_string(),
            ));
        }
        Ok(Self { values })
    }

    pub fn from_view<S>(values: &ArrayBase<S, Ix2>) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        Self::from_array(values.to_owned())
    }

    /// Buffer holding each iteration's values contiguously, the layout a
    /// column-major host matrix arrives in.
    pub fn from_column_major(n_alt: usize, n_iter: usize, data: Vec<f64>) -> Result<Self> {
        check_buffer_len(n_alt, n_iter, data.len())?;
        let values = Array2::from_shape_vec((n_alt, n_iter).f(), data)
            .map_err(|e| RankError::InvalidDimension(e.to_string()))?;
        Self::from_array(values)
    }

    /// Buffer holding each alternative's values contiguously.
    pub fn from_row_major(n_alt: usize, n_iter: usize, data: Vec<f64>) -> Result<Self> {
        check_buffer_len(n_alt, n_iter, data.len())?;
        let values = Array2::from_shape_vec((n_alt, n_iter), data)
            .map_err(|e| RankError::InvalidDimension(e.to_string()))?;
        Self::from_array(values)
    }

    /// One outcome vector per iteration. `n_alt` is explicit so that an empty
    /// iteration list still has a shape.
    pub fn from_iterations<I, V>(n_alt: usize, iterations: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[f64]>,
    {
        let mut data = Vec::new();
        let mut n_iter = 0;
        for (k, iteration) in iterations.into_iter().enumerate() {
            let iteration = iteration.as_ref();
            if iteration.len() != n_alt {
                return Err(RankError::InvalidDimension(format!(
                    "iteration {} has {} values, expected {}",
                    k,
                    iteration.len(),
                    n_alt
                )));
            }
            data.extend_from_slice(iteration);
            n_iter += 1;
        }
        Self::from_column_major(n_alt, n_iter, data)
    }

    pub fn n_alternatives(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_iterations(&self) -> usize {
        self.values.ncols()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Values of all alternatives in iteration `k`.
    ///
    /// # Panics
    /// If `k >= n_iterations()`.
    pub fn iteration(&self, k: usize) -> ArrayView1<'_, f64> {
        self.values.column(k)
    }

    /// Position `(alternative, iteration)` of the first NaN, scanning
    /// iteration by iteration.
    pub fn first_nan(&self) -> Option<(usize, usize)> {
        self.values
            .axis_iter(Axis(1))
            .enumerate()
            .find_map(|(k, column)| column.iter().position(|v| v.is_nan()).map(|i| (i, k)))
    }

    pub fn into_array(self) -> Array2<f64> {
        self.values
    }
}

fn check_buffer_len(n_alt: usize, n_iter: usize, len: usize) -> Result<()> {
    if n_alt == 0 {
        return Err(RankError::InvalidDimension(
            "at least one alternative required".to_string(),
        ));
    }
    let expected = n_alt.checked_mul(n_iter).ok_or_else(|| {
        RankError::InvalidDimension(format!("{} x {} overflows the buffer size", n_alt, n_iter))
    })?;
    if expected != len {
        return Err(RankError::InvalidDimension(format!(
            "buffer holds {} values, expected {} x {} = {}",
            len, n_alt, n_iter, expected
        )));
    }
    Ok(())
}
