use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::codec::{self, BINARY_RECORD_SIZE, RECORD_SIZE};
use crate::entry::HashEntry;
use crate::error::{Error, FormatError, Result};
use crate::holder::HashHolder;

/// Records held by the sequential reader's buffer during a scan.
pub const SCAN_BUFFER_RECORDS: usize = 1000;

/// A read-only, sorted hash database backed by one open file.
///
/// `search` only issues positioned reads and takes `&self`. `visit` moves the
/// file cursor, so it takes `&mut self`; callers that want parallel lookups
/// should open one `HashDatabase` per worker.
#[derive(Debug)]
pub struct HashDatabase {
    file: Option<File>,
    count: u64,
}

impl HashDatabase {
    /// Opens a database file and derives its record count from the file size.
    ///
    /// Only the text layout is readable. A size that fits the binary layout is
    /// rejected with [`Error::UnsupportedFormat`]; anything else is a format error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let count = record_count(size)?;

        debug!(path = %path.display(), size, records = count, "opened hash database");

        Ok(Self { file: Some(file), count })
    }

    /// Releases the file handle. Every later read fails with [`Error::Closed`].
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("closed hash database");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Number of records in the file.
    #[inline]
    pub fn hash_count(&self) -> u64 {
        self.count
    }

    /// See [`HashHolder::from_hex`].
    pub fn new_hash_holder(&self, hex_hash: &str) -> HashHolder {
        HashHolder::from_hex(hex_hash)
    }

    /// See [`HashHolder::from_password`].
    pub fn new_password_holder(&self, password: &str) -> HashHolder {
        HashHolder::from_password(password)
    }

    /// Walks every record in file order, which is ascending hash order.
    ///
    /// The visitor receives each entry with its zero-based index and returns
    /// `false` to stop. The entry is a view into a buffer that is overwritten by
    /// the next record; copy it to keep it. Returns how many records were handed
    /// to the visitor.
    ///
    /// A read failure part-way through the file ends the scan quietly, without
    /// an error: a truncated or unreadable tail looks like the end of the data.
    /// It is logged at `warn` level and shows up as a return value smaller than
    /// [`hash_count`](Self::hash_count).
    pub fn visit<F>(&mut self, visitor: F) -> Result<u64>
    where
        F: FnMut(&HashEntry, u64) -> bool,
    {
        let count = self.count;
        let mut file = self.file.as_ref().ok_or(Error::Closed)?;
        file.seek(SeekFrom::Start(0))?;

        let reader = BufReader::with_capacity(RECORD_SIZE * SCAN_BUFFER_RECORDS, file);
        Ok(scan_records(reader, count, visitor))
    }

    /// Binary searches the file for the holder's hash.
    ///
    /// Returns `Ok(None)` when the hash is confirmed absent. A failed or short
    /// read is an error, never a miss.
    pub fn search(&self, holder: &HashHolder) -> Result<Option<HashEntry>> {
        let file = self.file.as_ref().ok_or(Error::Closed)?;
        let mut buf = [0u8; RECORD_SIZE];

        let mut low = 0u64;
        let mut high = self.count;

        while low < high {
            let mid = low + (high - low) / 2;
            let entry = read_record_at(file, mid, &mut buf)?;
            trace!(index = mid, hash = %entry, "probe");

            match entry.compare(holder) {
                Ordering::Equal => return Ok(Some(entry)),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }

        Ok(None)
    }
}

/// Maps a file size to a record count, rejecting sizes no layout explains.
pub fn record_count(size: u64) -> Result<u64> {
    if size % RECORD_SIZE as u64 == 0 {
        Ok(size / RECORD_SIZE as u64)
    } else if size % BINARY_RECORD_SIZE as u64 == 0 {
        Err(Error::UnsupportedFormat { size })
    } else {
        Err(FormatError::UnrecognizedSize { size }.into())
    }
}

/// Sequentially decodes up to `record_count` records from `reader`.
///
/// One entry is decoded in place for every record. Stops when the visitor
/// returns `false` or when a read comes up short, and returns the number of
/// records passed to the visitor.
pub fn scan_records<R, F>(mut reader: R, record_count: u64, mut visitor: F) -> u64
where
    R: Read,
    F: FnMut(&HashEntry, u64) -> bool,
{
    let mut buf = [0u8; RECORD_SIZE];
    let mut entry = HashEntry::default();

    for index in 0..record_count {
        let decoded = match fill(&mut reader, &mut buf) {
            Ok(n) => codec::decode_into(&buf[..n], index, &mut entry).map_err(Error::from),
            Err(e) => Err(Error::from(e)),
        };
        if let Err(e) = decoded {
            warn!(index, record_count, error = %e, "scan stopped early");
            return index;
        }

        if !visitor(&entry, index) {
            return index + 1;
        }
    }

    record_count
}

// read() is not guaranteed to fill the buffer in one call. Returns fewer bytes
// than requested only at end of file.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

fn read_record_at(file: &File, index: u64, buf: &mut [u8; RECORD_SIZE]) -> Result<HashEntry> {
    let offset = index * RECORD_SIZE as u64;

    let mut total = 0usize;
    while total < RECORD_SIZE {
        match read_at(file, &mut buf[total..], offset + total as u64) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(codec::decode(&buf[..total], index)?)
}

#[cfg(unix)]
#[inline]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, offset)
}

// seek_read also moves the cursor; visit rewinds before every scan.
#[cfg(windows)]
#[inline]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, offset)
}
