//! Derived dataset metadata: display size and content checksum.

use sha2::{Digest, Sha256};

const KIB: f64 = 1024.0;

/// Format a byte count for display: `"512 B"`, `"1.50 KB"`, `"2.00 MB"`.
pub fn format_size(bytes: usize) -> String {
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.2} KB", b / KIB)
    } else {
        format!("{:.2} MB", b / (KIB * KIB))
    }
}

/// SHA-256 of the raw upload as lowercase hex.
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
