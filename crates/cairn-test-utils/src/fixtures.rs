//! Reusable buffers and sample inputs.

/// A byte array whose first byte sits on a 128-byte boundary.
///
/// 128 is the largest alignment a stack arena honours, so every padding
/// computation against this buffer depends only on the offset.
#[repr(C, align(128))]
pub struct AlignedBuffer<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> AlignedBuffer<N> {
    pub fn zeroed() -> Self {
        Self::filled(0)
    }

    /// A buffer with every byte set to `byte`, for zero-fill checks.
    pub fn filled(byte: u8) -> Self {
        Self { bytes: [byte; N] }
    }

    /// Heap-allocated variant for buffers too large for a test's stack.
    pub fn boxed_zeroed() -> Box<Self> {
        Box::new(Self::zeroed())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Three well-formed pose records: id, replicate, rvec xyz, tvec xyz.
pub const POSE_CSV: &str = "\
0,0,0.1,0.2,0.3,1.0,2.0,3.0
1,0,0.0,0.0,1.5707964,-1.0,0.5,10.0
2,1,-0.25,0.5,0.75,0.0,0.0,0.0
";

/// Pose records with CRLF line endings, padding spaces and blank lines.
pub const POSE_CSV_DIRTY: &str = "\r\n0, 0, 0.1, 0.2, 0.3, 1.0, 2.0, 3.0\r\n\r\n\n1,2,0,0,0,4,5,6\r\n";
