use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected when deciding whether a file is text.
pub const CLASSIFY_PREFIX_BYTES: u64 = 512;

/// Files whose inspected prefix has more than this fraction of control/high
/// bytes are treated as binary.
const HIGH_BYTE_RATIO: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Text,
    Binary,
    Unreadable,
}

/// Cheap text/binary heuristic in the spirit of perl's `-T` test.
///
/// A NUL byte anywhere in the prefix makes the file binary. Otherwise the
/// file is binary when more than 30% of the bytes actually read fall outside
/// printable ASCII and are not one of backspace, tab, newline or carriage
/// return.
pub fn classify(path: &Path) -> Classification {
    let Ok(file) = File::open(path) else {
        return Classification::Unreadable;
    };
    let mut prefix = Vec::with_capacity(CLASSIFY_PREFIX_BYTES as usize);
    if file
        .take(CLASSIFY_PREFIX_BYTES)
        .read_to_end(&mut prefix)
        .is_err()
    {
        return Classification::Unreadable;
    }
    classify_bytes(&prefix)
}

pub fn classify_bytes(prefix: &[u8]) -> Classification {
    if prefix.contains(&0) {
        return Classification::Binary;
    }
    if prefix.is_empty() {
        return Classification::Text;
    }

    let high = prefix.iter().filter(|&&b| is_high_byte(b)).count();
    if high as f64 / prefix.len() as f64 > HIGH_BYTE_RATIO {
        Classification::Binary
    } else {
        Classification::Text
    }
}

fn is_high_byte(b: u8) -> bool {
    !(32..=127).contains(&b) && !matches!(b, 8 | 9 | 10 | 13)
}
