use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Size and BLAKE3 digest of a file's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Number of bytes read.
    pub bytes: u64,
    /// Hex-encoded BLAKE3 hash.
    pub hash: String,
}

/// Stream a file through BLAKE3, counting bytes as it goes.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn file_digest(path: &Path) -> io::Result<FileDigest> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 8192];
    let mut bytes = 0u64;

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        bytes += n as u64;
    }

    Ok(FileDigest {
        bytes,
        hash: hasher.finalize().to_hex().to_string(),
    })
}
