use std::io::Write;

use crate::dat::DatArchive;
use crate::error::{DatError, Result};
use crate::filename::{self, DatName};
use crate::spec::{ExtEntry, FileInfo, Header};

/// Encode an archive into its exact byte layout.
///
/// Deterministic: the output is a pure function of the archive value, sized
/// exactly to [`DatArchive::encoded_len`]. Names gate the fixed-width slots,
/// so every one is re-checked before a single byte is emitted; an archive
/// edited after decoding cannot smuggle an over-wide name into a truncated
/// write.
pub fn encode_archive(archive: &DatArchive) -> Result<Vec<u8>> {
    for group in archive.groups() {
        filename::validate_extension(group.extension())?;
        for file in group.files() {
            DatName::new(file.name(), group.extension())?;
        }
    }

    let total = archive.encoded_len();
    if total > u32::MAX as u64 {
        return Err(DatError::ArchiveTooLarge { size: total });
    }

    let mut out = Vec::with_capacity(total as usize);
    out.extend_from_slice(&Header::new(archive.groups().len() as u32).into_bytes());

    // Extension table: group i's file table starts where group i-1's ends,
    // the first one right after this table.
    let mut table_pos = (Header::SIZE + ExtEntry::SIZE * archive.groups().len()) as u32;
    for group in archive.groups() {
        let entry = ExtEntry::new(group.extension(), table_pos, group.files().len() as u32);
        out.extend_from_slice(&entry.into_bytes());
        table_pos += (FileInfo::SIZE * group.files().len()) as u32;
    }

    // File tables: payloads run from the end of the last file table, in group
    // order and file order.
    let mut file_pos = table_pos;
    for group in archive.groups() {
        for file in group.files() {
            let info = FileInfo::new(file.name(), file.size(), file_pos);
            out.extend_from_slice(&info.into_bytes());
            file_pos += file.size();
        }
    }

    // Payloads, verbatim, in the same order as their recorded positions.
    for group in archive.groups() {
        for file in group.files() {
            out.extend_from_slice(file.data());
        }
    }

    debug_assert_eq!(out.len() as u64, total);
    Ok(out)
}

/// Encode an archive and stream the bytes to a writer.
pub fn write_archive<W>(writer: &mut W, archive: &DatArchive) -> Result<()>
where
    W: Write,
{
    writer.write_all(&encode_archive(archive)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::{ExtensionGroup, FileEntry};
    use crate::error::NameRule;
    use crate::group::group_files;
    use crate::read::decode_archive;

    #[test]
    fn test_byte_exact_layout() {
        let archive = group_files([("a.txt", b"hi".to_vec()), ("bb.txt", b"world".to_vec())]).unwrap();
        let buf = encode_archive(&archive).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&[0x4E, 0x61, 0xBC, 0x00, 0x01, 0x00, 0x00, 0x00]);
        expected.extend_from_slice(ExtEntry::new("txt", 20, 2).into_bytes().as_slice());
        expected.extend_from_slice(FileInfo::new("a", 2, 52).into_bytes().as_slice());
        expected.extend_from_slice(FileInfo::new("bb", 5, 54).into_bytes().as_slice());
        expected.extend_from_slice(b"hiworld");

        assert_eq!(buf.len(), 59);
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_empty_archive_is_bare_header() {
        let buf = encode_archive(&DatArchive::default()).unwrap();
        assert_eq!(buf, [0x4E, 0x61, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_round_trip() {
        let archive = group_files([
            ("a.txt", b"hi".to_vec()),
            ("logo.bmp", vec![0u8; 300]),
            ("b.txt", b"there".to_vec()),
            ("theme.wav", vec![1, 2, 3, 4]),
        ])
        .unwrap();

        let decoded = decode_archive(&encode_archive(&archive).unwrap()).unwrap();
        assert_eq!(decoded, archive);
    }

    #[test]
    fn test_multi_group_positions() {
        // txt, bmp, txt -> two groups; bmp's file table follows txt's two records.
        let archive = group_files([
            ("a.txt", b"hi".to_vec()),
            ("logo.bmp", b"px".to_vec()),
            ("b.txt", b"there".to_vec()),
        ])
        .unwrap();
        let buf = encode_archive(&archive).unwrap();

        // header 8 + ext table 24; txt table at 32, bmp table at 32 + 2*16 = 64
        assert_eq!(&buf[8..12], b"txt\0");
        assert_eq!(buf[12..16], 32u32.to_le_bytes());
        assert_eq!(buf[16..20], 2u32.to_le_bytes());
        assert_eq!(&buf[20..24], b"bmp\0");
        assert_eq!(buf[24..28], 64u32.to_le_bytes());
        assert_eq!(buf[28..32], 1u32.to_le_bytes());

        // payloads start after the file tables: 32 + 3*16 = 80
        assert_eq!(&buf[80..82], b"hi");
        assert_eq!(buf.len() as u64, archive.encoded_len());
    }

    #[test]
    fn test_deterministic_output() {
        let archive = group_files([("a.txt", b"hi".to_vec())]).unwrap();
        assert_eq!(encode_archive(&archive).unwrap(), encode_archive(&archive).unwrap());
    }

    #[test]
    fn test_rejects_edited_over_wide_name() {
        // bypass the grouper, as a caller editing a decoded archive would
        let archive = DatArchive::new(vec![ExtensionGroup::new(
            "txt".to_string(),
            vec![FileEntry::new("waytoolongname", b"x".to_vec())],
        )]);
        assert!(matches!(
            encode_archive(&archive),
            Err(DatError::InvalidName {
                rule: NameRule::BaseLength,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_extension_on_empty_group() {
        let archive = DatArchive::new(vec![ExtensionGroup::new("toolong".to_string(), Vec::new())]);
        assert!(matches!(
            encode_archive(&archive),
            Err(DatError::InvalidName {
                rule: NameRule::ExtensionLength,
                ..
            })
        ));
    }
}
