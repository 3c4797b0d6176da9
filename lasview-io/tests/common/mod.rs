#![allow(dead_code)]

use std::fs;
use std::path::Path;

use las::point::Format;
use las::{Builder, Color, Point, Transform, Vector, Writer};

pub const SCALE: f64 = 0.01;

fn transforms() -> Vector<Transform> {
    Vector {
        x: Transform {
            scale: SCALE,
            offset: 500_000.0,
        },
        y: Transform {
            scale: SCALE,
            offset: 4_000_000.0,
        },
        z: Transform {
            scale: SCALE,
            offset: 0.0,
        },
    }
}

/// Writes a LAS 1.2 file; format 2 when `colors` is given, format 0 otherwise.
pub fn write_las(path: &Path, points: &[[f64; 3]], colors: Option<&[[u16; 3]]>) {
    let mut builder = Builder::from((1, 2));
    builder.point_format = Format::new(if colors.is_some() { 2 } else { 0 }).unwrap();
    builder.transforms = transforms();
    let header = builder.into_header().unwrap();

    let mut writer = Writer::from_path(path, header).unwrap();
    for (i, &[x, y, z]) in points.iter().enumerate() {
        let color = colors.map(|c| Color::new(c[i][0], c[i][1], c[i][2]));
        writer
            .write_point(Point {
                x,
                y,
                z,
                color,
                ..Default::default()
            })
            .unwrap();
    }
    writer.close().unwrap();
}

/// A small elevation-only cloud.
pub fn write_elevation_cloud(path: &Path) {
    write_las(
        path,
        &[
            [500_010.0, 4_000_020.0, 100.0],
            [500_012.0, 4_000_022.0, 105.0],
            [500_014.0, 4_000_024.0, 110.0],
        ],
        None,
    );
}

/// A small coloured cloud with a constant blue channel.
pub fn write_rgb_cloud(path: &Path) {
    write_las(
        path,
        &[
            [500_000.0, 4_000_000.0, 10.0],
            [500_001.0, 4_000_001.0, 11.0],
            [500_002.0, 4_000_002.0, 12.0],
        ],
        Some(&[[0, 2000, 7], [32_000, 4000, 7], [64_000, 6000, 7]]),
    );
}

/// Overwrites the legacy point count of a LAS 1.2 header with `u32::MAX`.
pub fn overstate_point_count(path: &Path) {
    let mut bytes = fs::read(path).unwrap();
    bytes[107..111].copy_from_slice(&u32::MAX.to_le_bytes());
    fs::write(path, bytes).unwrap();
}
