use serde::{Deserialize, Serialize};

/// Upload metadata carried alongside extracted resume text.
/// `file_size` is 0 when the resume was pasted as plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub file_size: u64,
}
