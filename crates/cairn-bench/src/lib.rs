//! Benchmark inputs shared by the Cairn Criterion benches.
//!
//! - [`pose_csv`]: a deterministic pose file of any length
//! - [`rotation_set`]: a spread of non-degenerate 3×3 matrices

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write as _;

use cairn_math::{Mat3, Vec3};
use cairn_text::ByteString;

/// Render `records` pose lines with CRLF endings every third line.
pub fn pose_csv(records: u32) -> ByteString {
    let mut out = ByteString::new();
    for id in 0..records {
        let f = id as f32;
        let ending = if id % 3 == 0 { "\r\n" } else { "\n" };
        // Writes into a ByteString only fail on allocation failure.
        let _ = write!(
            out,
            "{id},{},{},{},{},{},{},{}{ending}",
            id % 8,
            f * 0.001,
            -f * 0.002,
            0.5,
            f,
            f * 0.5,
            -f
        );
    }
    out
}

/// `count` matrices whose columns are linearly independent.
pub fn rotation_set(count: usize) -> Vec<Mat3> {
    (0..count)
        .map(|i| {
            let t = i as f32 * 0.01;
            Mat3::from_rows(
                Vec3::new(1.0 + t, t, 0.5 * t),
                Vec3::new(-t, 1.0, t),
                Vec3::new(0.25 * t, -t, 1.0 + t),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_csv_has_one_line_per_record() {
        assert_eq!(pose_csv(10).lines().len(), 10);
        assert_eq!(cairn_text::parse_poses(&pose_csv(10)).unwrap().len(), 10);
    }

    #[test]
    fn rotation_set_is_orthonormalizable() {
        for m in rotation_set(20) {
            let q = m.orthonormalize();
            assert!((q.column(2).magnitude() - 1.0).abs() < 1e-4);
        }
    }
}
