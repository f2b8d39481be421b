//! Log source abstraction: read log data from files, mocks, or other backends.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use crate::error::{LogError, LogResult};

/// Abstraction for reading log data by path.
///
/// Lets sessions and tools run against the filesystem or in-memory fixtures.
pub trait LogSource: Send + Sync {
    /// Read all lines from the given path, in file order.
    fn read_lines(&self, path: &str) -> LogResult<Vec<String>>;

    /// Current size of the source in bytes. Used to detect growth when following.
    fn size(&self, path: &str) -> LogResult<u64>;

    /// Read up to `len` raw bytes starting at `offset`. Shorter at end of source.
    fn read_range(&self, path: &str, offset: u64, len: u64) -> LogResult<Vec<u8>>;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

impl LogSource for FileLogSource {
    fn read_lines(&self, path: &str) -> LogResult<Vec<String>> {
        let file = File::open(path).map_err(|e| LogError::from_io(path, e))?;
        let mut reader = BufReader::new(file);

        let mut lines = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| LogError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            lines.push(decode_line(&buf));
        }
        Ok(lines)
    }

    fn size(&self, path: &str) -> LogResult<u64> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| LogError::from_io(path, e))
    }

    fn read_range(&self, path: &str, offset: u64, len: u64) -> LogResult<Vec<u8>> {
        let mut file = File::open(path).map_err(|e| LogError::from_io(path, e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| LogError::from_io(path, e))?;
        let mut buf = Vec::new();
        file.take(len)
            .read_to_end(&mut buf)
            .map_err(|e| LogError::from_io(path, e))?;
        Ok(buf)
    }
}

/// Lossy UTF-8 decode with the line terminator (`\n` or `\r\n`) removed.
pub(crate) fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
