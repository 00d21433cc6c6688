use crate::error::{DatError, NameRule, Result};

/// On-disk base-name slot width.
pub const BASE_NAME_MAX: usize = 8;
/// On-disk extension length (the slot is 4 bytes, NUL-padded).
pub const EXTENSION_LEN: usize = 3;

/// A validated `(base name, extension)` pair.
///
/// The format stores the base name and extension in fixed-width NUL-padded
/// slots, so both are checked up front: base 1-8 bytes, extension exactly
/// 3 bytes, pure 7-bit ASCII, no NUL, no path separators, no extra dots.
/// Anything wider is rejected here rather than truncated at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatName {
    name: String,
    extension: String,
}

impl DatName {
    /// Split a full file name on its last `.` and validate both halves.
    pub fn parse(full_name: &str) -> Result<Self> {
        let Some(dot) = full_name.rfind('.') else {
            return Err(invalid(full_name, NameRule::MissingExtension));
        };
        Self::new_checked(full_name, &full_name[..dot], &full_name[dot + 1..])
    }

    pub fn new(name: &str, extension: &str) -> Result<Self> {
        let full_name = format!("{name}.{extension}");
        Self::new_checked(&full_name, name, extension)
    }

    fn new_checked(full_name: &str, name: &str, extension: &str) -> Result<Self> {
        if let Some(rule) = charset_violation(name).or_else(|| charset_violation(extension)) {
            return Err(invalid(full_name, rule));
        }
        if name.contains('.') {
            return Err(invalid(full_name, NameRule::ExtraDot));
        }
        if name.is_empty() || name.len() > BASE_NAME_MAX {
            return Err(invalid(full_name, NameRule::BaseLength));
        }
        if extension.len() != EXTENSION_LEN {
            return Err(invalid(full_name, NameRule::ExtensionLength));
        }

        Ok(Self {
            name: name.to_string(),
            extension: extension.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

/// Validate an extension on its own, for groups that carry no files.
pub fn validate_extension(extension: &str) -> Result<()> {
    if let Some(rule) = charset_violation(extension) {
        return Err(invalid(extension, rule));
    }
    if extension.len() != EXTENSION_LEN {
        return Err(invalid(extension, NameRule::ExtensionLength));
    }
    Ok(())
}

fn charset_violation(s: &str) -> Option<NameRule> {
    for b in s.bytes() {
        if b == 0 {
            return Some(NameRule::Nul);
        }
        if b == b'/' || b == b'\\' {
            return Some(NameRule::PathSeparator);
        }
        if !b.is_ascii() {
            return Some(NameRule::NonAscii);
        }
    }
    None
}

fn invalid(full_name: &str, rule: NameRule) -> DatError {
    DatError::InvalidName {
        name: full_name.to_string(),
        rule,
    }
}
