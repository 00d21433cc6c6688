use std::io::Read;

use zerocopy::FromBytes;

use crate::dat::{DatArchive, ExtensionGroup, FileEntry};
use crate::error::{DatError, Result};
use crate::spec::{DAT_MAGIC, ExtEntry, FileInfo, Header};

/// Buffer a reader to the end, then decode.
pub fn read_archive<R>(reader: &mut R) -> Result<DatArchive>
where
    R: Read,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    decode_archive(&buf)
}

/// Decode a complete archive from an in-memory buffer.
///
/// Table and payload positions are absolute byte offsets, so every access is
/// bounds-checked against the buffer; any structural violation aborts the
/// whole decode. The buffer is never mutated.
pub fn decode_archive(buf: &[u8]) -> Result<DatArchive> {
    // Magic before count: a short non-archive buffer reports the mismatch,
    // not a truncated header.
    let magic_bytes = take(buf, 0, 4, || "magic".to_string())?;
    let magic = u32::from_le_bytes(magic_bytes.try_into().unwrap());
    if magic != DAT_MAGIC {
        return Err(DatError::InvalidMagic {
            expected: DAT_MAGIC,
            found: magic,
        });
    }

    let count_bytes = take(buf, 4, 4, || "group count".to_string())?;
    let group_count = u32::from_le_bytes(count_bytes.try_into().unwrap()) as u64;
    let ext_table = take(buf, Header::SIZE as u64, group_count * ExtEntry::SIZE as u64, || {
        "extension table".to_string()
    })?;

    // Group order follows the extension table; file order follows each file table.
    let mut groups = Vec::with_capacity(group_count as usize);
    for chunk in ext_table.chunks_exact(ExtEntry::SIZE) {
        let ext_entry = ExtEntry::read_from_bytes(chunk).unwrap();
        let extension = ext_entry.extension_lossy();

        let file_count = ext_entry.file_count.get() as u64;
        let file_table = take(
            buf,
            ext_entry.table_pos.get() as u64,
            file_count * FileInfo::SIZE as u64,
            || format!("file table `{extension}`"),
        )?;

        let mut files = Vec::with_capacity(file_count as usize);
        for info_chunk in file_table.chunks_exact(FileInfo::SIZE) {
            let info = FileInfo::read_from_bytes(info_chunk).unwrap();
            let name = info.name_lossy();
            let data = take(buf, info.pos.get() as u64, info.size.get() as u64, || {
                format!("file `{name}.{extension}`")
            })?;
            files.push(FileEntry::new(name, data.to_vec()));
        }

        groups.push(ExtensionGroup::new(extension, files));
    }

    Ok(DatArchive::new(groups))
}

fn take<'a>(buf: &'a [u8], offset: u64, len: u64, section: impl FnOnce() -> String) -> Result<&'a [u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= buf.len() as u64 => Ok(&buf[offset as usize..end as usize]),
        _ => Err(DatError::Truncated {
            section: section(),
            offset,
            needed: len,
            available: (buf.len() as u64).saturating_sub(offset.min(buf.len() as u64)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One `txt` group holding `a.txt` (b"hi") and `bb.txt` (b"world").
    fn two_file_fixture() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0x4E, 0x61, 0xBC, 0x00, 0x01, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(ExtEntry::new("txt", 20, 2).into_bytes().as_slice());
        buf.extend_from_slice(FileInfo::new("a", 2, 52).into_bytes().as_slice());
        buf.extend_from_slice(FileInfo::new("bb", 5, 54).into_bytes().as_slice());
        buf.extend_from_slice(b"hiworld");
        assert_eq!(buf.len(), 59);
        buf
    }

    #[test]
    fn test_decode_two_files() {
        let archive = decode_archive(&two_file_fixture()).unwrap();
        assert_eq!(archive.groups().len(), 1);

        let group = &archive.groups()[0];
        assert_eq!(group.extension(), "txt");
        assert_eq!(group.files().len(), 2);
        assert_eq!(group.files()[0].name(), "a");
        assert_eq!(group.files()[0].data(), b"hi");
        assert_eq!(group.files()[1].name(), "bb");
        assert_eq!(group.files()[1].data(), b"world");
    }

    #[test]
    fn test_decode_empty_archive() {
        let archive = decode_archive(&[0x4E, 0x61, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert!(archive.groups().is_empty());
    }

    #[test]
    fn test_bad_magic() {
        let mut buf = two_file_fixture();
        buf[0] = 0xFF;
        assert!(matches!(
            decode_archive(&buf),
            Err(DatError::InvalidMagic {
                expected: DAT_MAGIC,
                found: 0x00BC_61FF,
            })
        ));
    }

    #[test]
    fn test_bad_magic_on_short_buffer() {
        // 4 bad bytes and nothing else is still a magic mismatch, not truncation
        assert!(matches!(
            decode_archive(&[0xFF; 4]),
            Err(DatError::InvalidMagic {
                found: 0xFFFF_FFFF,
                ..
            })
        ));
        assert!(matches!(decode_archive(&[0xFF; 7]), Err(DatError::InvalidMagic { .. })));
    }

    #[test]
    fn test_truncation_at_every_boundary() {
        let buf = two_file_fixture();
        for len in 0..buf.len() {
            assert!(
                matches!(decode_archive(&buf[..len]), Err(DatError::Truncated { .. })),
                "prefix of {len} bytes must fail as truncated",
            );
        }
    }

    #[test]
    fn test_payload_offset_out_of_range() {
        let mut buf = two_file_fixture();
        // point `a.txt` far past the end of the buffer
        buf[32..36].copy_from_slice(&1_000_000u32.to_le_bytes());
        match decode_archive(&buf) {
            Err(DatError::Truncated { section, offset, .. }) => {
                assert_eq!(section, "file `a.txt`");
                assert_eq!(offset, 1_000_000);
            }
            other => panic!("expected truncation error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_archive_from_reader() {
        let buf = two_file_fixture();
        let archive = read_archive(&mut std::io::Cursor::new(&buf)).unwrap();
        assert_eq!(archive.file_count(), 2);
    }

    #[test]
    fn test_decode_is_repeatable() {
        let buf = two_file_fixture();
        assert_eq!(decode_archive(&buf).unwrap(), decode_archive(&buf).unwrap());
    }
}
