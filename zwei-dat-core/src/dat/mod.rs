use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::spec;

/// DAT archive, an ordered list of extension groups.
///
/// Serialization covers the structure (group order, names, sizes) but not the
/// payload bytes; it backs table-of-contents output, not persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatArchive {
    groups: Vec<ExtensionGroup>,
}

impl DatArchive {
    pub fn new(groups: Vec<ExtensionGroup>) -> Self {
        DatArchive { groups }
    }

    pub fn groups(&self) -> &[ExtensionGroup] {
        &self.groups
    }

    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    /// Exact encoded size: header, one 12-byte record per group, one 16-byte
    /// record per file, then the raw payloads. No padding between sections.
    pub fn encoded_len(&self) -> u64 {
        let mut len = (spec::Header::SIZE + spec::ExtEntry::SIZE * self.groups.len()) as u64;
        for group in &self.groups {
            len += (spec::FileInfo::SIZE * group.files.len()) as u64;
            len += group.files.iter().map(|f| f.data.len() as u64).sum::<u64>();
        }
        len
    }
}

/// All files sharing one 3-character extension, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionGroup {
    extension: String,
    files: Vec<FileEntry>,
}

impl ExtensionGroup {
    pub fn new(extension: String, files: Vec<FileEntry>) -> Self {
        ExtensionGroup { extension, files }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// On-disk name of a member entry, `name.ext`.
    pub fn full_name(&self, file: &FileEntry) -> String {
        format!("{}.{}", file.name(), self.extension)
    }
}

/// One archived file: base name plus opaque payload bytes.
#[derive(Clone, Default, PartialEq)]
pub struct FileEntry {
    name: String,
    data: Vec<u8>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        FileEntry {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl std::fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntry")
            .field("name", &self.name)
            .field("size", &self.data.len())
            .finish()
    }
}

impl Serialize for FileEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("FileEntry", 2)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("size", &self.size())?;
        s.end()
    }
}
