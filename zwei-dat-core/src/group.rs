use indexmap::IndexMap;

use crate::dat::{DatArchive, ExtensionGroup, FileEntry};
use crate::error::Result;
use crate::filename::DatName;

/// Partition `(full_name, payload)` pairs into extension groups.
///
/// Groups appear in the order their extension is first seen; files keep their
/// insertion order within a group. Duplicate names are preserved as distinct
/// entries. The first invalid name aborts the whole build, so no partially
/// grouped archive is ever returned.
pub fn group_files<I, S, B>(files: I) -> Result<DatArchive>
where
    I: IntoIterator<Item = (S, B)>,
    S: AsRef<str>,
    B: Into<Vec<u8>>,
{
    let mut groups: IndexMap<String, Vec<FileEntry>> = IndexMap::new();
    for (full_name, data) in files {
        let name = DatName::parse(full_name.as_ref())?;
        groups
            .entry(name.extension().to_string())
            .or_default()
            .push(FileEntry::new(name.name(), data));
    }

    Ok(DatArchive::new(
        groups
            .into_iter()
            .map(|(extension, files)| ExtensionGroup::new(extension, files))
            .collect(),
    ))
}
