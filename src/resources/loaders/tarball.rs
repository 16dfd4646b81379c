//! # Tarball Loader
//!
//! Serves resource bytes from a gzip-compressed tar archive.
//!
//! The archive is decompressed once and scanned record by record. Each
//! header record is 512 bytes; the entry name is `prefix/name` when the
//! ustar prefix field is set. The size field is read as octal ASCII digits
//! up to the first NUL or space, without rejecting digits outside `0..=7`.

use crate::config::TAR_RECORD_SIZE;
use crate::{GridsteadError, GridsteadResult};
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};

const NAME_FIELD: Range<usize> = 0..100;
const SIZE_FIELD: Range<usize> = 124..136;
const TYPE_FLAG: usize = 156;
const MAGIC_FIELD: Range<usize> = 257..262;
const PREFIX_FIELD: Range<usize> = 345..500;

/// In-memory index of the regular files of a tarball.
#[derive(Debug, Clone, Default)]
pub struct TarballLoader {
    data: Vec<u8>,
    entries: HashMap<PathBuf, Range<usize>>,
}

impl TarballLoader {
    /// Reads and indexes a `.tar.gz` file.
    pub fn open(path: impl AsRef<Path>) -> GridsteadResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut data = Vec::new();
        GzDecoder::new(file).read_to_end(&mut data)?;

        let loader = Self::from_tar_bytes(data)?;
        log::info!("Tarball '{}' indexed: {} entries", path.display(), loader.entries.len());
        Ok(loader)
    }

    /// Indexes gzip-compressed tar bytes.
    pub fn from_gzip_bytes(bytes: &[u8]) -> GridsteadResult<Self> {
        let mut data = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut data)?;
        Self::from_tar_bytes(data)
    }

    /// Indexes uncompressed tar bytes.
    pub fn from_tar_bytes(data: Vec<u8>) -> GridsteadResult<Self> {
        let mut entries = HashMap::new();
        let mut offset = 0;

        while offset + TAR_RECORD_SIZE <= data.len() {
            let header = &data[offset..offset + TAR_RECORD_SIZE];

            if header.iter().all(|&byte| byte == 0) || &header[MAGIC_FIELD] != b"ustar" {
                break;
            }

            let size = parse_size(&header[SIZE_FIELD]) as usize;
            let start = offset + TAR_RECORD_SIZE;
            let end = start
                .checked_add(size)
                .filter(|&end| end <= data.len())
                .ok_or_else(|| GridsteadError::InvalidArchive(format!("entry at offset {} is truncated", offset)))?;

            if matches!(header[TYPE_FLAG], b'0' | 0) {
                let name = entry_name(header);
                log::trace!("Tarball entry '{}' ({} bytes)", name.display(), size);
                entries.insert(name, start..end);
            }

            offset = start + size.div_ceil(TAR_RECORD_SIZE) * TAR_RECORD_SIZE;
        }

        Ok(Self { data, entries })
    }

    /// Bytes of the entry stored under `path`.
    pub fn search(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.entries
            .get(path.as_ref())
            .map(|range| &self.data[range.clone()])
    }

    /// Names of all indexed entries.
    pub fn entries(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }
}

fn parse_size(field: &[u8]) -> u64 {
    field
        .iter()
        .take_while(|&&c| c != 0 && c != b' ')
        .fold(0u64, |size, &c| size.wrapping_mul(8).wrapping_add(u64::from(c.wrapping_sub(b'0'))))
}

fn field_str(field: &[u8]) -> String {
    let end = field.iter().position(|&c| c == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn entry_name(header: &[u8]) -> PathBuf {
    let name = field_str(&header[NAME_FIELD]);
    let prefix = field_str(&header[PREFIX_FIELD]);

    if prefix.is_empty() {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}/{}", prefix, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, prefix: &str, size: usize, type_flag: u8) -> Vec<u8> {
        let mut header = vec![0u8; TAR_RECORD_SIZE];
        header[..name.len()].copy_from_slice(name.as_bytes());
        let size = format!("{:011o}", size);
        header[124..135].copy_from_slice(size.as_bytes());
        header[TYPE_FLAG] = type_flag;
        header[257..263].copy_from_slice(b"ustar\0");
        header[345..345 + prefix.len()].copy_from_slice(prefix.as_bytes());
        header
    }

    fn archive(files: &[(&str, &str, &[u8], u8)]) -> Vec<u8> {
        let mut data = Vec::new();
        for (name, prefix, contents, type_flag) in files {
            data.extend(header(name, prefix, contents.len(), *type_flag));
            data.extend_from_slice(contents);
            let padding = (TAR_RECORD_SIZE - contents.len() % TAR_RECORD_SIZE) % TAR_RECORD_SIZE;
            data.extend(std::iter::repeat(0).take(padding));
        }
        data.extend(vec![0u8; TAR_RECORD_SIZE * 2]);
        data
    }

    #[test]
    fn test_parse_size_octal() {
        assert_eq!(parse_size(b"00000001750\0"), 1000);
        assert_eq!(parse_size(b"17 "), 15);
        // Digits outside the octal range are accepted as-is
        assert_eq!(parse_size(b"9\0"), 9);
    }

    #[test]
    fn test_index_entries() {
        let data = archive(&[
            ("hello.txt", "", b"hello", b'0'),
            ("dir", "", b"", b'5'),
            ("deep.txt", "very/long/prefix", &[7u8; 600], b'0'),
        ]);
        let loader = TarballLoader::from_tar_bytes(data).unwrap();

        assert_eq!(loader.search("hello.txt"), Some(&b"hello"[..]));
        assert_eq!(loader.search("very/long/prefix/deep.txt").map(<[u8]>::len), Some(600));
        assert_eq!(loader.search("dir"), None);
        assert_eq!(loader.entries().count(), 2);
    }

    #[test]
    fn test_truncated_entry() {
        let mut data = header("big.bin", "", 4096, b'0');
        data.extend(vec![1u8; 100]);
        assert!(matches!(
            TarballLoader::from_tar_bytes(data),
            Err(GridsteadError::InvalidArchive(_))
        ));
    }

    #[test]
    fn test_stops_without_magic() {
        let mut data = header("b.txt", "", 1, b'0');
        data[257..263].copy_from_slice(b"other\0");
        data.extend(vec![0u8; TAR_RECORD_SIZE]);
        data.extend(archive(&[("a.txt", "", b"a", b'0')]));

        let loader = TarballLoader::from_tar_bytes(data).unwrap();
        assert_eq!(loader.entries().count(), 0);
    }
}
