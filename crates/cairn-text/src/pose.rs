//! Pose records stored as comma-separated text.
//!
//! Each non-empty line holds eight fields:
//!
//! ```text
//! id, replicate_id, rx, ry, rz, tx, ty, tz
//! ```
//!
//! `r*` is a rotation vector and `t*` a translation. Lines may end in
//! `\n` or `\r\n`; blank lines are skipped and fields may carry
//! surrounding whitespace.

use std::path::Path;
use std::str::FromStr;

use cairn_math::Vec3;

use crate::byte_string::ByteString;
use crate::error::TextError;

/// Number of fields in a pose record.
pub const POSE_FIELDS: usize = 8;

/// One pose record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Pose identifier.
    pub id: u32,
    /// Replicate the pose belongs to.
    pub replicate_id: u32,
    /// Rotation vector.
    pub rvec: Vec3,
    /// Translation vector.
    pub tvec: Vec3,
}

/// Parse every non-empty line of `content` as a pose record.
///
/// Records are numbered from 1 among non-empty lines; columns from 1.
pub fn parse_poses(content: &ByteString) -> Result<Vec<Pose>, TextError> {
    let lines = content.lines();
    if lines.is_empty() {
        return Err(TextError::NoRecords);
    }
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| parse_record(i + 1, line))
        .collect()
}

/// Load `path` and parse it with [`parse_poses`].
pub fn load_poses(path: impl AsRef<Path>) -> Result<Vec<Pose>, TextError> {
    let path = path.as_ref();
    let content = ByteString::load_from_file(path)?;
    let poses = parse_poses(&content)?;
    tracing::debug!(path = %path.display(), records = poses.len(), "parsed poses");
    Ok(poses)
}

fn parse_record(record: usize, line: &ByteString) -> Result<Pose, TextError> {
    let fields: Vec<&[u8]> = line
        .as_bytes()
        .split(|&b| b == b',')
        .map(<[u8]>::trim_ascii)
        .collect();
    if fields.len() != POSE_FIELDS {
        return Err(TextError::FieldCount {
            record,
            expected: POSE_FIELDS,
            found: fields.len(),
        });
    }

    let float = |column: usize| parse_field::<f32>(record, column, fields[column - 1]);
    let vec3 = |first: usize| -> Result<Vec3, TextError> {
        Ok(Vec3::new(float(first)?, float(first + 1)?, float(first + 2)?))
    };

    Ok(Pose {
        id: parse_field(record, 1, fields[0])?,
        replicate_id: parse_field(record, 2, fields[1])?,
        rvec: vec3(3)?,
        tvec: vec3(6)?,
    })
}

fn parse_field<T: FromStr>(record: usize, column: usize, raw: &[u8]) -> Result<T, TextError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| TextError::InvalidField {
            record,
            column,
            value: String::from_utf8_lossy(raw).into_owned(),
        })
}
