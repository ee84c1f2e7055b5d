/// Options that control how a schema document is decoded.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Reject unknown enumeration and table attributes, and index columns
    /// that do not name a field of their table.
    pub strict: bool,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
