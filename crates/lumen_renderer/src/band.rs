//! Horizontal band partition of the canvas.
//!
//! Each worker renders one band of full-width rows. Bands never overlap and
//! together cover every row of the canvas.

/// A rectangular span of the canvas, `[start, end)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First column of the band
    pub start_x: u32,
    /// First row of the band
    pub start_y: u32,
    /// One past the last column
    pub end_x: u32,
    /// One past the last row
    pub end_y: u32,
    /// Index of the worker rendering this band
    pub index: usize,
}

impl Band {
    pub fn new(start_x: u32, start_y: u32, end_x: u32, end_y: u32, index: usize) -> Self {
        Self { start_x, start_y, end_x, end_y, index }
    }

    pub fn width(&self) -> u32 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> u32 {
        self.end_y - self.start_y
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Split a `width`x`height` canvas into `threads` horizontal bands.
///
/// Band `i` starts at row `floor(height * i / threads)`. The last band always
/// ends at `height` and absorbs the remainder. Integer arithmetic keeps the
/// boundaries exact, so callers must ensure `0 < threads <= height`.
pub fn generate_bands(width: u32, height: u32, threads: usize) -> Vec<Band> {
    let boundary = |i: usize| -> u32 {
        if i >= threads {
            height
        } else {
            (height as u64 * i as u64 / threads as u64) as u32
        }
    };

    (0..threads)
        .map(|i| Band::new(0, boundary(i), width, boundary(i + 1), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bands_exact_fit() {
        let bands = generate_bands(640, 360, 3);
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0], Band::new(0, 0, 640, 120, 0));
        assert_eq!(bands[1], Band::new(0, 120, 640, 240, 1));
        assert_eq!(bands[2], Band::new(0, 240, 640, 360, 2));
    }

    #[test]
    fn test_last_band_absorbs_remainder() {
        let bands = generate_bands(10, 10, 3);
        let heights: Vec<u32> = bands.iter().map(|b| b.height()).collect();
        assert_eq!(heights, vec![3, 3, 4]);
    }

    #[test]
    fn test_seven_workers_reach_last_row() {
        // 360 / 7 * 7 is not exactly 360 in floating point
        let bands = generate_bands(640, 360, 7);
        assert_eq!(bands.last().map(|b| b.end_y), Some(360));
    }

    #[test]
    fn test_single_band_covers_canvas() {
        let bands = generate_bands(4, 5, 1);
        assert_eq!(bands, vec![Band::new(0, 0, 4, 5, 0)]);
        assert_eq!(bands[0].pixel_count(), 20);
    }

    #[test]
    fn test_partition_has_no_gap_or_overlap() {
        for height in 1..=120u32 {
            for threads in 1..=height.min(24) as usize {
                let bands = generate_bands(3, height, threads);
                assert_eq!(bands.len(), threads);
                assert_eq!(bands[0].start_y, 0);
                assert_eq!(bands[threads - 1].end_y, height);

                for pair in bands.windows(2) {
                    assert_eq!(pair[0].end_y, pair[1].start_y, "H={} T={}", height, threads);
                }
                for (i, band) in bands.iter().enumerate() {
                    assert_eq!(band.index, i);
                    assert!(band.height() >= 1, "H={} T={}", height, threads);
                }

                let total: usize = bands.iter().map(|b| b.pixel_count()).sum();
                assert_eq!(total, 3 * height as usize);
            }
        }
    }
}
