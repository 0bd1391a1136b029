//! Turns a chronological series into supervised (input window, target window) pairs.

use crate::common::defs::Discrete;
use crate::error::{Error, Result};
use ndarray::Array2;

/// One supervised pair. `target` immediately follows `input` in the source series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowedSample<T> {
    input: Vec<T>,
    target: Vec<T>,
}

impl<T> WindowedSample<T> {
    pub fn input(&self) -> &[T] {
        &self.input
    }

    pub fn target(&self) -> &[T] {
        &self.target
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceWindower {
    window_size: usize,
    output_size: usize,
}

impl SequenceWindower {
    pub fn new(window_size: usize, output_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::invalid_parameter("window_size must be at least 1"));
        }
        if output_size == 0 {
            return Err(Error::invalid_parameter("output_size must be at least 1"));
        }

        Ok(Self {
            window_size,
            output_size,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Produces `len - window_size - output_size + 1` samples in chronological order, or
    /// none at all when the series is too short to fill a single pair.
    pub fn window<T: Clone>(&self, series: &[T]) -> Vec<WindowedSample<T>> {
        let span = match self.window_size.checked_add(self.output_size) {
            Some(span) if span <= series.len() => span,
            _ => return Vec::new(),
        };

        series
            .windows(span)
            .map(|chunk| {
                let (input, target) = chunk.split_at(self.window_size);
                WindowedSample {
                    input: input.to_vec(),
                    target: target.to_vec(),
                }
            })
            .collect()
    }

    /// Packs samples into row-major (inputs, targets) matrices, one row per sample.
    /// Columns always follow the windower's sizes, so no samples gives `(0, w)` and `(0, o)`.
    pub fn to_arrays<T>(
        &self,
        samples: &[WindowedSample<T>],
    ) -> Result<(Array2<Discrete>, Array2<Discrete>)>
    where
        T: Copy + Into<Discrete>,
    {
        let inputs = samples
            .iter()
            .flat_map(|s| s.input.iter().map(|&v| v.into()))
            .collect::<Vec<_>>();
        let targets = samples
            .iter()
            .flat_map(|s| s.target.iter().map(|&v| v.into()))
            .collect::<Vec<_>>();

        let to_matrix = |cols: usize, data: Vec<Discrete>| {
            Array2::from_shape_vec((samples.len(), cols), data)
                .map_err(|e| Error::invalid_parameter(format!("ragged samples: {e}")))
        };

        Ok((
            to_matrix(self.window_size, inputs)?,
            to_matrix(self.output_size, targets)?,
        ))
    }
}

pub fn window<T: Clone>(
    series: &[T],
    window_size: usize,
    output_size: usize,
) -> Result<Vec<WindowedSample<T>>> {
    Ok(SequenceWindower::new(window_size, output_size)?.window(series))
}

/// Chronological train/test partition. By default the trailing `test_fraction` is the
/// test part; `inverted` takes it from the leading end instead.
pub fn split<T>(series: &[T], test_fraction: f64, inverted: bool) -> Result<(&[T], &[T])> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(Error::invalid_parameter(format!(
            "test_fraction {test_fraction} is outside [0, 1)"
        )));
    }

    let train_len = (series.len() as f64 * (1.0 - test_fraction)) as usize;
    let test_len = series.len() - train_len;
    if inverted {
        let (test, train) = series.split_at(test_len);
        Ok((train, test))
    } else {
        Ok(series.split_at(train_len))
    }
}

/// Trailing `window_size` values, the input for predicting the next extraction.
pub fn last_window<T>(series: &[T], window_size: usize) -> Option<&[T]> {
    if window_size == 0 || series.len() < window_size {
        return None;
    }

    Some(&series[series.len() - window_size..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertor::*;
    use rstest::rstest;

    #[test]
    fn small_series_example() {
        let samples = window(&[1, 2, 3, 4, 5], 2, 1).unwrap();

        let pairs = samples
            .iter()
            .map(|s| (s.input().to_vec(), s.target().to_vec()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                (vec![1, 2], vec![3]),
                (vec![2, 3], vec![4]),
                (vec![3, 4], vec![5]),
            ]
        );
    }

    #[rstest]
    #[case(10, 3, 1)]
    #[case(10, 3, 4)]
    #[case(7, 6, 1)]
    #[case(30, 1, 1)]
    #[case(5, 4, 1)]
    fn samples_reconstruct_the_series(
        #[case] len: usize,
        #[case] w: usize,
        #[case] o: usize,
    ) {
        let series = (0..len as i32).map(|v| v * 3 % 37).collect::<Vec<_>>();
        let samples = window(&series, w, o).unwrap();

        assert_eq!(samples.len(), len - w - o + 1);
        for (i, s) in samples.iter().enumerate() {
            let joined = [s.input(), s.target()].concat();
            assert_eq!(joined, &series[i..i + w + o]);
        }
    }

    #[rstest]
    #[case(0, 1, 1)]
    #[case(3, 3, 1)]
    #[case(4, 2, 3)]
    #[case(3, usize::MAX, 1)]
    #[case(3, 1, usize::MAX)]
    #[case(3, usize::MAX, usize::MAX)]
    fn short_series_yields_nothing(#[case] len: usize, #[case] w: usize, #[case] o: usize) {
        let series = vec![7; len];
        assert_that!(window(&series, w, o).unwrap()).is_empty();
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    fn zero_sizes_are_rejected(#[case] w: usize, #[case] o: usize) {
        assert!(matches!(
            window(&[1, 2, 3], w, o),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn split_takes_trailing_test_part() {
        let series = (0..10).collect::<Vec<_>>();
        let (train, test) = split(&series, 0.2, false).unwrap();
        assert_eq!(train, &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(test, &[8, 9]);
    }

    #[test]
    fn inverted_split_takes_leading_test_part() {
        let series = (0..10).collect::<Vec<_>>();
        let (train, test) = split(&series, 0.2, true).unwrap();
        assert_eq!(test, &[0, 1]);
        assert_eq!(train, &[2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn zero_fraction_leaves_test_empty(#[case] inverted: bool) {
        let series = (0..10).collect::<Vec<_>>();
        let (train, test) = split(&series, 0.0, inverted).unwrap();
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[rstest]
    #[case(1.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    fn fraction_out_of_range_is_rejected(#[case] fraction: f64) {
        assert!(matches!(
            split(&[1, 2, 3], fraction, false),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn last_window_is_the_tail() {
        let series = [4, 8, 15, 16, 23, 42];
        assert_eq!(last_window(&series, 3), Some(&[16, 23, 42][..]));
        assert_eq!(last_window(&series, 7), None);
    }

    #[test]
    fn arrays_have_one_row_per_sample() {
        let windower = SequenceWindower::new(3, 2).unwrap();
        let (x, y) = windower.to_arrays(&windower.window(&[1, 2, 3, 4, 5, 6])).unwrap();

        assert_eq!(x.shape(), &[2, 3]);
        assert_eq!(y.shape(), &[2, 2]);
        assert_eq!(x.row(1).to_vec(), vec![2, 3, 4]);
        assert_eq!(y.row(1).to_vec(), vec![5, 6]);
    }

    #[test]
    fn no_samples_keep_the_window_columns() {
        let windower = SequenceWindower::new(30, 1).unwrap();
        let (x, y) = windower.to_arrays(&windower.window(&[1, 2, 3])).unwrap();

        assert_eq!(x.shape(), &[0, 30]);
        assert_eq!(y.shape(), &[0, 1]);
    }
}
