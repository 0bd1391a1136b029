extern crate fairs;
mod common;

use common::*;
use fairs::windowing::{last_window, split, window};
use fairs::*;

#[test]
fn csv_to_train_and_test_matrices() {
    let values = (0..40).map(|i| (i * 11) % 37).collect::<Vec<i64>>();
    let series = read_extractions(csv_of(&values).as_bytes()).unwrap();
    let numbers = series
        .numbers()
        .iter()
        .map(|&n| Discrete::from(n))
        .collect::<Vec<_>>();

    let (train, test) = split(&numbers, 0.25, false).unwrap();
    assert_eq!((train.len(), test.len()), (30, 10));

    let windower = SequenceWindower::new(5, 2).unwrap();
    let (x, y) = windower.to_arrays(&windower.window(train)).unwrap();
    assert_eq!(x.shape(), &[24, 5]);
    assert_eq!(y.shape(), &[24, 2]);
    assert_eq!(x.row(0).to_vec(), numbers[..5].to_vec());
    assert_eq!(y.row(23).to_vec(), numbers[28..30].to_vec());

    let (x, _) = windower.to_arrays(&windower.window(test)).unwrap();
    assert_eq!(x.shape(), &[4, 5]);
}

#[test]
fn color_classes_window_like_numbers() {
    let wheel = WheelTopology::european();
    let series = read_extractions(csv_of(&[0, 1, 2, 3, 4]).as_bytes()).unwrap();
    let classes = series.color_classes(&wheel);

    let samples = window(&classes, 2, 1).unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].input(), &[0, 2]);
    assert_eq!(samples[0].target(), &[1]);
    assert_eq!(last_window(&classes, 2), Some(&[2, 1][..]));
}

#[test]
fn too_short_test_partition_windows_to_nothing() {
    let numbers = (0..20).collect::<Vec<Discrete>>();
    let (_, test) = split(&numbers, 0.1, false).unwrap();

    assert_eq!(test.len(), 2);
    assert!(window(test, 2, 1).unwrap().is_empty());

    let windower = SequenceWindower::new(5, 1).unwrap();
    let (x, y) = windower.to_arrays(&windower.window(test)).unwrap();
    assert_eq!((x.shape(), y.shape()), (&[0, 5][..], &[0, 1][..]));
}
