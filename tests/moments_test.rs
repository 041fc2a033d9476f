use approx::assert_relative_eq;
use camino::Utf8Path;
use dihedral_stats::{
    conversion::{deg2rad_inplace, rad2deg_inplace},
    Block, ColumnStatistics, DataFile, Delimiter, InMemoryData, StatsError, StatsParams,
};

mod common;
use common::{angular_block, assert_vec_close, init_logger};

#[test]
fn test_constant_columns() {
    init_logger();
    let data = InMemoryData::new(Block::from_fn(50, 3, |_, j| [12.5, -170.0, 90.0][j]), 7);
    let params = StatsParams::default();

    let means = data.linear_means(&params).unwrap();
    assert_eq!((means.n_rows, means.n_cols), (50, 3));
    assert_vec_close(&means.values, &[12.5, -170.0, 90.0], 1e-12);
    let sigmas = data.linear_sigmas(&means.values, &params).unwrap();
    assert_vec_close(&sigmas, &[0.0; 3], 1e-12);

    let circ = data.circular_means(&params).unwrap();
    assert_vec_close(
        &circ.values,
        &[12.5_f64.to_radians(), (-170.0_f64).to_radians(), 90.0_f64.to_radians()],
        1e-12,
    );
    let circ_sigmas = data.circular_sigmas(&circ.values, &params).unwrap();
    assert_vec_close(&circ_sigmas, &[0.0; 3], 1e-7);
}

#[test]
fn test_chunked_matches_unchunked() {
    init_logger();
    let block = angular_block(42, 1000, &[-120.0, 0.0, 178.0, 60.0]);
    let params = StatsParams::default();
    let whole = InMemoryData::new(block.clone(), 1000);
    let reference_means = whole.linear_means(&params).unwrap();
    let reference_circ = whole.circular_means(&params).unwrap();
    let reference_sigmas = whole.linear_sigmas(&reference_means.values, &params).unwrap();
    let reference_circ_sigmas = whole
        .circular_sigmas(&reference_circ.values, &params)
        .unwrap();

    for chunk in [1, 3, 64, 999] {
        let data = InMemoryData::new(block.clone(), chunk);
        let means = data.linear_means(&params).unwrap();
        assert_eq!(means.n_rows, 1000);
        assert_vec_close(&means.values, &reference_means.values, 1e-9);
        assert_vec_close(
            &data.linear_sigmas(&means.values, &params).unwrap(),
            &reference_sigmas,
            1e-9,
        );

        let circ = data.circular_means(&params).unwrap();
        assert_vec_close(&circ.values, &reference_circ.values, 1e-9);
        assert_vec_close(
            &data.circular_sigmas(&circ.values, &params).unwrap(),
            &reference_circ_sigmas,
            1e-9,
        );
    }
}

#[test]
fn test_sequential_matches_parallel() {
    let data = InMemoryData::new(angular_block(7, 500, &[10.0, -90.0, 170.0]), 33);
    let seq = StatsParams::builder().parallel(false).build().unwrap();
    let par = StatsParams::builder().parallel(true).build().unwrap();

    let means_seq = data.linear_means(&seq).unwrap();
    assert_eq!(means_seq, data.linear_means(&par).unwrap());
    assert_eq!(
        data.linear_sigmas(&means_seq.values, &seq).unwrap(),
        data.linear_sigmas(&means_seq.values, &par).unwrap()
    );

    let circ_seq = data.circular_means(&seq).unwrap();
    assert_eq!(circ_seq, data.circular_means(&par).unwrap());
    assert_eq!(
        data.circular_sigmas(&circ_seq.values, &seq).unwrap(),
        data.circular_sigmas(&circ_seq.values, &par).unwrap()
    );
}

#[test]
fn test_circular_mean_is_not_the_arithmetic_mean() {
    let data = InMemoryData::from_column(&[170.0, -170.0, 175.0, -175.0], 3);
    let params = StatsParams::default();

    let linear = data.linear_means(&params).unwrap();
    assert_relative_eq!(linear.values[0], 0.0);

    let circular = data.circular_means(&params).unwrap();
    assert_relative_eq!(circular.values[0].abs(), std::f64::consts::PI, epsilon = 1e-12);
}

#[test]
fn test_unit_round_trip() {
    let block = angular_block(3, 20, &[-179.0, 0.5, 179.0]);
    let mut m = block.clone();
    deg2rad_inplace(&mut m);
    assert!(m.iter().all(|x| x.abs() <= std::f64::consts::PI));
    rad2deg_inplace(&mut m);
    assert_relative_eq!(m, block, epsilon = 1e-10);
}

#[test]
fn test_whitespace_file() {
    init_logger();
    let data = DataFile::new(Utf8Path::new("tests/data/dihedrals.dat"), 3);
    let params = StatsParams::default();

    let means = data.linear_means(&params).unwrap();
    assert_eq!((means.n_rows, means.n_cols), (4, 2));
    assert_relative_eq!(means.values[1], 60.25);
    let sigmas = data.linear_sigmas(&means.values, &params).unwrap();
    assert_relative_eq!(sigmas[1], (8.75_f64 / 3.0).sqrt(), epsilon = 1e-12);

    let circ = data.circular_means(&params).unwrap();
    assert_relative_eq!(circ.values[0].to_degrees(), -179.5, epsilon = 1e-2);
    let circ_sigmas = data.circular_sigmas(&circ.values, &params).unwrap();
    // residuals ±1.5°, ±2°
    assert_relative_eq!(
        circ_sigmas[0].to_degrees(),
        (12.5_f64 / 3.0).sqrt(),
        epsilon = 1e-2
    );
}

#[test]
fn test_whole_file_in_one_chunk() {
    let params = StatsParams::default();
    let reference = DataFile::new(Utf8Path::new("tests/data/dihedrals.dat"), 1)
        .linear_means(&params)
        .unwrap();

    for max_chunk_rows in [usize::MAX / 2, usize::MAX] {
        let data = DataFile::new(Utf8Path::new("tests/data/dihedrals.dat"), max_chunk_rows);
        let means = data.linear_means(&params).unwrap();
        assert_eq!(means.n_rows, 4);
        assert_vec_close(&means.values, &reference.values, 1e-12);
        assert_eq!(data.angular_shifts(&params).unwrap().len(), 2);
    }
}

#[test]
fn test_csv_file() {
    let data = DataFile::new(Utf8Path::new("tests/data/distances.csv"), 2)
        .with_delimiter(Delimiter::Char(b','));
    let params = StatsParams::default();

    let means = data.linear_means(&params).unwrap();
    assert_eq!(means.n_rows, 3);
    assert_vec_close(&means.values, &[2.0, 4.0, 6.0], 1e-12);
    assert_vec_close(
        &data.linear_sigmas(&means.values, &params).unwrap(),
        &[1.0, 2.0, 3.0],
        1e-12,
    );
}

#[test]
fn test_error_taxonomy() {
    let params = StatsParams::default();

    let empty = InMemoryData::new(Block::zeros(0, 2), 10);
    assert_eq!(
        empty.linear_means(&params),
        Err(StatsError::InsufficientData {
            statistic: "linear means",
            n_rows: 0,
            required: 1
        })
    );

    let single = InMemoryData::from_rows(&[vec![1.0, 2.0]], 10).unwrap();
    assert_eq!(
        single.linear_sigmas(&[1.0, 2.0], &params),
        Err(StatsError::InsufficientData {
            statistic: "linear sigmas",
            n_rows: 1,
            required: 2
        })
    );
    assert_eq!(
        single.linear_sigmas(&[1.0], &params),
        Err(StatsError::DimensionMismatch {
            expected: 2,
            found: 1
        })
    );

    assert_eq!(
        InMemoryData::from_rows(&[vec![1.0, 2.0], vec![3.0]], 10).unwrap_err(),
        StatsError::MalformedInput {
            row: 1,
            expected: 2,
            found: 1
        }
    );

    let missing = DataFile::new(Utf8Path::new("tests/data/does_not_exist.dat"), 10);
    assert!(matches!(
        missing.linear_means(&params),
        Err(StatsError::IoError(_))
    ));
}
