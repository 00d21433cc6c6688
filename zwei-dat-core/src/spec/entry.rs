use zerocopy::byteorder::{LE, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::trim_padding;

/// Extension-table record: one per distinct extension, in first-seen order.
#[derive(Debug, Clone, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ExtEntry {
    pub extension: [u8; 4],
    pub table_pos: U32<LE>,
    pub file_count: U32<LE>,
}

static_assertions::assert_eq_size!(ExtEntry, [u8; 12]);

impl ExtEntry {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// `extension` must already be validated to at most 4 bytes.
    pub fn new(extension: &str, table_pos: u32, file_count: u32) -> Self {
        let mut ext = [0u8; 4];
        ext[..extension.len()].copy_from_slice(extension.as_bytes());
        Self {
            extension: ext,
            table_pos: U32::new(table_pos),
            file_count: U32::new(file_count),
        }
    }

    pub fn extension_lossy(&self) -> String {
        String::from_utf8_lossy(trim_padding(&self.extension)).into_owned()
    }

    pub fn into_bytes(self) -> [u8; Self::SIZE] {
        self.as_bytes().try_into().unwrap()
    }
}

/// File-table record: one per file, in insertion order within its group.
#[derive(Debug, Clone, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct FileInfo {
    pub name: [u8; 8],
    pub size: U32<LE>,
    pub pos: U32<LE>,
}

static_assertions::assert_eq_size!(FileInfo, [u8; 16]);

impl FileInfo {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// `name` must already be validated to at most 8 bytes.
    pub fn new(name: &str, size: u32, pos: u32) -> Self {
        let mut padded = [0u8; 8];
        padded[..name.len()].copy_from_slice(name.as_bytes());
        Self {
            name: padded,
            size: U32::new(size),
            pos: U32::new(pos),
        }
    }

    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(trim_padding(&self.name)).into_owned()
    }

    pub fn into_bytes(self) -> [u8; Self::SIZE] {
        self.as_bytes().try_into().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ext_entry_read_write() {
        let bytes = &[
            0x74, 0x78, 0x74, 0x00, 0x14, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00,
        ];
        let entry = ExtEntry::read_from_bytes(bytes).unwrap();
        assert_eq!(entry.extension_lossy(), "txt");
        assert_eq!(entry.table_pos.get(), 20);
        assert_eq!(entry.file_count.get(), 2);

        let write_bytes = ExtEntry::new("txt", 20, 2).into_bytes();
        assert_eq!(write_bytes, *bytes);
    }

    #[test]
    fn test_file_info_read_write() {
        let bytes = &[
            0x62, 0x62, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x36, 0x00, 0x00, 0x00,
        ];
        let info = FileInfo::read_from_bytes(bytes).unwrap();
        assert_eq!(info.name_lossy(), "bb");
        assert_eq!(info.size.get(), 5);
        assert_eq!(info.pos.get(), 54);

        let write_bytes = FileInfo::new("bb", 5, 54).into_bytes();
        assert_eq!(write_bytes, *bytes);
    }
}
