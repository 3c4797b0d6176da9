mod common;

use approx::assert_relative_eq;
use lasview_core::{centroid_coordinate, ColorMode, LoadError, ViewerConfig};
use lasview_io::{read_raw, CloudLoader, LasLoader};
use tempfile::tempdir;

#[test]
fn test_load_elevation_cloud() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Detection_5.las");
    common::write_elevation_cloud(&path);

    let record = LasLoader::new(&ViewerConfig::default()).load(&path).unwrap();
    assert_eq!(record.source_path(), path);
    assert_eq!(record.len(), 3);
    assert_eq!(record.color_mode(), ColorMode::Elevation);

    let elevations = record.elevations().unwrap();
    assert_eq!(elevations.len(), record.len());
    assert_relative_eq!(record.points()[0].x, 500_010.0, epsilon = 1e-6);
    assert_relative_eq!(record.points()[0].z, 100.0 / 100_000.0, epsilon = 1e-9);
    assert_relative_eq!(elevations[2], 110.0 / 100_000.0, epsilon = 1e-9);
    assert_eq!(centroid_coordinate(&record), "4000022.000000, 500012.000000");
}

#[test]
fn test_load_rgb_cloud() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Detection_6.las");
    common::write_rgb_cloud(&path);

    let record = LasLoader::new(&ViewerConfig::default()).load(&path).unwrap();
    assert_eq!(record.color_mode(), ColorMode::Rgb);
    let colors = record.colors().unwrap();
    assert_eq!(colors.len(), record.len());

    assert_relative_eq!(colors[0][0], 0.2, epsilon = 1e-9);
    assert_relative_eq!(colors[2][0], 0.8, epsilon = 1e-9);
    assert_relative_eq!(colors[1][1], 0.5, epsilon = 1e-9);
    for rgb in colors {
        for &c in rgb {
            assert!((0.2..=0.8).contains(&c));
        }
        assert_relative_eq!(rgb[2], 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_z_scale_comes_from_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Detection_7.las");
    common::write_elevation_cloud(&path);

    let config = ViewerConfig::new().with_z_scale_factor(10.0);
    let record = LasLoader::new(&config).load(&path).unwrap();
    assert_relative_eq!(record.points()[1].z, 10.5, epsilon = 1e-9);
}

#[test]
fn test_read_raw_keeps_stored_integers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Detection_8.las");
    common::write_elevation_cloud(&path);

    let raw = read_raw(&path).unwrap();
    assert_eq!(raw.len(), 3);
    assert_eq!(raw.z, vec![10_000, 10_500, 11_000]);
    assert_relative_eq!(raw.transforms[2].scale, common::SCALE);
    assert!(raw.colors.is_none());
}

#[test]
fn test_empty_cloud_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Detection_9.las");
    common::write_las(&path, &[], None);

    let err = LasLoader::new(&ViewerConfig::default()).load(&path).unwrap_err();
    assert_eq!(err, LoadError::Empty);
}

#[test]
fn test_overstated_point_count_is_read_failed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Detection_10.las");
    common::write_elevation_cloud(&path);
    common::overstate_point_count(&path);

    match LasLoader::new(&ViewerConfig::default()).load(&path) {
        Err(LoadError::ReadFailed(msg)) => assert!(msg.contains("declares")),
        other => panic!("expected ReadFailed, got {other:?}"),
    }
    assert!(matches!(read_raw(&path), Err(LoadError::ReadFailed(_))));
}
