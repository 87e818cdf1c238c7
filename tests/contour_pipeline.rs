//! End-to-end contour extraction scenarios: FITS in, CSV and PNG out.

use isophote::batch::{self, BatchOptions};
use isophote::contour::{ContourBuilder, LevelSpec, LevelStatus};
use isophote::io::fits::write_frame;
use isophote::io::table::read_contour_csv;
use isophote::test_patterns::{gaussian_blob, hot_block_frame, noisy_frame};
use ndarray::Array2;
use tempfile::tempdir;

/// 40x40 frame whose corner blocks alternate 0/2 (sigma exactly 1) with a
/// Gaussian blob over the center.
fn calibrated_blob_frame() -> Array2<f64> {
    let mut grid = gaussian_blob(40, 4.0, 50.0);
    for r in 0..40 {
        for c in 0..40 {
            let in_corner = (r < 4 || r >= 36) && (c < 4 || c >= 36);
            if in_corner {
                grid[[r, c]] = ((r + c) % 2) as f64 * 2.0;
            }
        }
    }
    grid
}

#[test]
fn test_hot_block_through_fits_roundtrip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempdir().unwrap();
    let path = dir.path().join("block.fits");

    // 20x20 zeros with a 5x5 block of 100 centered at (10, 10); the flat
    // corners give sigma 0, so a single level catches exactly the block.
    let frame = hot_block_frame(20, 5, 0.0, 100.0);
    write_frame(&frame.view(), &path).unwrap();
    let loaded = isophote::io::fits::load_image(&path).unwrap();

    let outcome = ContourBuilder::new(LevelSpec::Count(1))
        .build(&loaded.view())
        .unwrap();

    assert_eq!(outcome.map.iter().sum::<u32>(), 25);
    for r in 0..20 {
        for c in 0..20 {
            let expected = u32::from((8..13).contains(&r) && (8..13).contains(&c));
            assert_eq!(outcome.map[[r, c]], expected, "mismatch at ({r}, {c})");
        }
    }
}

#[test]
fn test_cold_seed_reports_and_truncates() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Noisy frame with the center pixel forced below one sigma.
    let mut frame = noisy_frame(40, 100.0, 10.0, 17);
    frame[[20, 20]] = 0.0;

    let outcome = ContourBuilder::new(LevelSpec::Count(3))
        .build(&frame.view())
        .unwrap();

    assert!(outcome.sigma > 0.0);
    assert!(outcome.map.iter().all(|&v| v == 0));
    assert_eq!(outcome.levels.len(), 1);
    assert_eq!(outcome.levels[0].status, LevelStatus::SeedNotHot);
}

#[test]
fn test_separate_levels_sum_to_combined_build() {
    let _ = env_logger::builder().is_test(true).try_init();
    let grid = calibrated_blob_frame();

    let low = ContourBuilder::new(LevelSpec::Multipliers(vec![5.0]))
        .build(&grid.view())
        .unwrap();
    let high = ContourBuilder::new(LevelSpec::Multipliers(vec![20.0]))
        .build(&grid.view())
        .unwrap();
    let combined = ContourBuilder::new(LevelSpec::Multipliers(vec![5.0, 20.0]))
        .build(&grid.view())
        .unwrap();

    assert!(low.map.iter().sum::<u32>() > high.map.iter().sum::<u32>());
    let summed = &low.map + &high.map;
    assert_eq!(summed, combined.map);
}

#[test]
fn test_nested_levels_are_monotonic() {
    let _ = env_logger::builder().is_test(true).try_init();
    let grid = calibrated_blob_frame();

    let outcome = ContourBuilder::new(LevelSpec::Multipliers(vec![5.0, 10.0, 20.0]))
        .build(&grid.view())
        .unwrap();

    // Counts are bounded by the number of levels, the seed clears all
    // three, and every pixel counted at k levels sits inside the region
    // counted at k-1.
    assert_eq!(*outcome.map.iter().max().unwrap(), 3);
    assert_eq!(outcome.map[[20, 20]], 3);
    assert_eq!(outcome.levels.len(), 3);
    for diag in &outcome.levels {
        assert!(matches!(diag.status, LevelStatus::Filled { .. }));
    }
}

#[test]
fn test_batch_skips_undersized_frames() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempdir().unwrap();
    let input = dir.path().join("fits");
    let csv_dir = dir.path().join("bitmaps");
    let png_dir = dir.path().join("imgs");
    std::fs::create_dir_all(&input).unwrap();

    let good = hot_block_frame(20, 5, 0.0, 100.0);
    write_frame(&good.view(), input.join("good.fits")).unwrap();
    let undersized = Array2::<f64>::zeros((8, 8));
    write_frame(&undersized.view(), input.join("tiny.fits")).unwrap();

    let options = BatchOptions {
        levels: LevelSpec::Count(1),
        sqrt_stretch: false,
        serial: true,
    };
    let summary = batch::process_directory(&input, &csv_dir, &png_dir, &options).unwrap();

    assert_eq!(summary.processed.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.processed[0].ends_with("good.fits"));
    assert!(summary.failed[0].0.ends_with("tiny.fits"));

    assert!(csv_dir.join("good.csv").exists());
    assert!(png_dir.join("good.png").exists());
    assert!(!csv_dir.join("tiny.csv").exists());

    // The table on disk matches a direct build of the same frame.
    let table = read_contour_csv(csv_dir.join("good.csv")).unwrap();
    let direct = ContourBuilder::new(LevelSpec::Count(1))
        .build(&good.view())
        .unwrap();
    assert_eq!(table, direct.map);
}

#[test]
fn test_batch_sqrt_stretch_compresses_counts() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempdir().unwrap();
    let input = dir.path().join("fits");
    let csv_dir = dir.path().join("bitmaps");
    let png_dir = dir.path().join("imgs");
    std::fs::create_dir_all(&input).unwrap();

    // Sigma 0 on flat corners: four levels all coincide at zero, so the
    // block accumulates a count of 4 which the stretch maps to 2.
    let frame = hot_block_frame(20, 5, 0.0, 100.0);
    write_frame(&frame.view(), input.join("block.fits")).unwrap();

    let options = BatchOptions {
        levels: LevelSpec::Count(4),
        sqrt_stretch: true,
        serial: true,
    };
    let summary = batch::process_directory(&input, &csv_dir, &png_dir, &options).unwrap();
    assert_eq!(summary.processed.len(), 1);

    let table = read_contour_csv(csv_dir.join("block.csv")).unwrap();
    assert_eq!(table[[10, 10]], 2);
    assert_eq!(table[[0, 0]], 0);
}
