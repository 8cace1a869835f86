// Copyright 2025 the Footlight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque-pixel hull extraction and lookups.
//!
//! A hull is the list of every pixel whose alpha exceeds [`ALPHA_THRESHOLD`],
//! sorted by row and then column. The ordering is what makes
//! [`hull_contains`] a binary search, so every producer in this crate emits
//! points in scan order and never re-sorts.

use alloc::vec::Vec;

use crate::buffer::{BYTES_PER_PIXEL, PixelBuffer};
use crate::types::{PixelPoint, RowSpan};

/// Pixels with alpha strictly above this value count as opaque.
pub const ALPHA_THRESHOLD: u8 = 0;

/// Extract the hull of a pixel buffer.
pub fn extract_hull_points(buffer: &PixelBuffer) -> Vec<PixelPoint> {
    extract_hull_points_raw(buffer.as_bytes(), buffer.width(), buffer.height())
}

/// Extract the hull from raw row-major RGBA8 bytes.
///
/// Rows that are missing from a short `data` slice are treated as transparent.
pub fn extract_hull_points_raw(data: &[u8], width: u32, height: u32) -> Vec<PixelPoint> {
    let mut points = Vec::new();
    if width == 0 {
        return points;
    }
    let stride = width as usize * BYTES_PER_PIXEL;
    for (y, row) in data.chunks_exact(stride).take(height as usize).enumerate() {
        for (x, px) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            if px[BYTES_PER_PIXEL - 1] > ALPHA_THRESHOLD {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Texture dimensions are u32 and well below i32::MAX in practice."
                )]
                points.push(PixelPoint::new(x as i32, y as i32));
            }
        }
    }
    log::trace!(
        "extracted {} hull points from {}x{} pixels",
        points.len(),
        width,
        height
    );
    points
}

/// Whether `point` is one of the sorted hull `points`.
pub fn hull_contains(points: &[PixelPoint], point: PixelPoint) -> bool {
    points.binary_search(&point).is_ok()
}

/// Iterate the leftmost and rightmost opaque column of each non-empty row.
///
/// Bounds computations only need these extremes: every pixel of a row lies
/// between them, so transforming the spans is enough to bound the silhouette.
pub fn row_spans(points: &[PixelPoint]) -> impl Iterator<Item = RowSpan> + '_ {
    points.chunk_by(|a, b| a.y == b.y).map(|row| RowSpan {
        y: row[0].y,
        x_min: row[0].x,
        x_max: row[row.len() - 1].x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Clone)]
    struct Rng(u64);

    impl Rng {
        fn new(seed: u64) -> Self {
            Self(seed)
        }
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }
        fn below(&mut self, n: u32) -> u32 {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Result is reduced modulo a u32."
            )]
            let v = (self.next_u64() % u64::from(n)) as u32;
            v
        }
    }

    /// 3×3 ring: opaque border, transparent center.
    fn ring() -> PixelBuffer {
        let mut buf = PixelBuffer::filled(3, 3, [255, 0, 0, 255]);
        buf.set_pixel(1, 1, [255, 0, 0, 0]);
        buf
    }

    fn random_buffer(rng: &mut Rng, width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::transparent(width, height);
        for y in 0..height {
            for x in 0..width {
                if rng.below(3) == 0 {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "Value is reduced modulo 255."
                    )]
                    let a = (1 + rng.below(255)) as u8;
                    buf.set_pixel(x, y, [0, 0, 0, a]);
                }
            }
        }
        buf
    }

    #[test]
    fn ring_points_in_scan_order() {
        let points = extract_hull_points(&ring());
        assert_eq!(
            points,
            vec![
                PixelPoint::new(0, 0),
                PixelPoint::new(1, 0),
                PixelPoint::new(2, 0),
                PixelPoint::new(0, 1),
                PixelPoint::new(2, 1),
                PixelPoint::new(0, 2),
                PixelPoint::new(1, 2),
                PixelPoint::new(2, 2),
            ]
        );
        assert!(hull_contains(&points, PixelPoint::new(2, 1)));
        assert!(!hull_contains(&points, PixelPoint::new(1, 1)));
        assert!(!hull_contains(&points, PixelPoint::new(3, 2)));
        assert!(!hull_contains(&points, PixelPoint::new(-1, 0)));
    }

    #[test]
    fn transparent_buffer_has_no_points() {
        let buf = PixelBuffer::transparent(8, 5);
        assert!(extract_hull_points(&buf).is_empty());
    }

    #[test]
    fn short_data_is_transparent_tail() {
        // Two full rows of a 2×3 texture; the third row is missing.
        let data = [255_u8; 16];
        let points = extract_hull_points_raw(&data, 2, 3);
        assert_eq!(points.len(), 4);
        assert_eq!(points.last().copied(), Some(PixelPoint::new(1, 1)));
    }

    #[test]
    fn random_hulls_are_sorted_and_search_matches_scan() {
        let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
        for _ in 0..8 {
            let w = 1 + rng.below(24);
            let h = 1 + rng.below(24);
            let buf = random_buffer(&mut rng, w, h);
            let points = extract_hull_points(&buf);
            assert!(
                points.windows(2).all(|p| p[0] < p[1]),
                "hull must be sorted by (y, x)"
            );
            for _ in 0..100 {
                let q = PixelPoint::new(
                    rng.below(w + 4) as i32 - 2,
                    rng.below(h + 4) as i32 - 2,
                );
                let linear = points.iter().any(|p| *p == q);
                assert_eq!(hull_contains(&points, q), linear, "query {q:?}");
            }
        }
    }

    #[test]
    fn spans_cover_row_extremes() {
        let points = extract_hull_points(&ring());
        let spans: Vec<_> = row_spans(&points).collect();
        assert_eq!(
            spans,
            vec![
                RowSpan {
                    y: 0,
                    x_min: 0,
                    x_max: 2
                },
                RowSpan {
                    y: 1,
                    x_min: 0,
                    x_max: 2
                },
                RowSpan {
                    y: 2,
                    x_min: 0,
                    x_max: 2
                },
            ]
        );
        assert_eq!(row_spans(&[]).count(), 0);
    }
}
