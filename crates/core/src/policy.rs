use std::sync::OnceLock;

use regex::Regex;

use crate::errors::ValidationError;

/// Single-extension archive formats. Compound extensions such as `.tar.gz`
/// never pass the base-name rule, so compressed tarballs are not offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    Zip,
    SevenZip,
    Tar,
}

impl ArchiveFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "zip" => Some(Self::Zip),
            "7z" => Some(Self::SevenZip),
            "tar" => Some(Self::Tar),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::SevenZip => "7z",
            Self::Tar => "tar",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Zip => "application/zip",
            Self::SevenZip => "application/x-7z-compressed",
            Self::Tar => "application/x-tar",
        }
    }
}

fn base_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static base name pattern"))
}

/// Filename rules a relayed file must satisfy before it is uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePolicy {
    accepted: Vec<ArchiveFormat>,
}

impl Default for FilePolicy {
    fn default() -> Self {
        Self { accepted: vec![ArchiveFormat::Zip] }
    }
}

impl FilePolicy {
    pub fn new(accepted: Vec<ArchiveFormat>) -> Self {
        if accepted.is_empty() {
            return Self::default();
        }
        Self { accepted }
    }

    pub fn accepted(&self) -> &[ArchiveFormat] {
        &self.accepted
    }

    /// Checks the base name first, then the extension, and returns the matched format.
    pub fn validate(&self, name: &str) -> Result<ArchiveFormat, ValidationError> {
        let (base, extension) = match name.rsplit_once('.') {
            Some((base, extension)) => (base, extension),
            None => (name, ""),
        };

        if !base_name_pattern().is_match(base) {
            return Err(ValidationError::InvalidName { name: name.to_owned() });
        }

        ArchiveFormat::from_extension(extension)
            .filter(|format| self.accepted.contains(format))
            .ok_or_else(|| ValidationError::UnsupportedExtension {
                name: name.to_owned(),
                accepted: self.accepted_label(),
            })
    }

    fn accepted_label(&self) -> String {
        self.accepted.iter().map(ArchiveFormat::extension).collect::<Vec<_>>().join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveFormat, FilePolicy};
    use crate::errors::ValidationError;

    #[test]
    fn accepts_plain_zip_names() {
        let policy = FilePolicy::default();

        assert_eq!(policy.validate("report.zip"), Ok(ArchiveFormat::Zip));
        assert_eq!(policy.validate("build_2024-01.zip"), Ok(ArchiveFormat::Zip));
        assert_eq!(policy.validate("REPORT.ZIP"), Ok(ArchiveFormat::Zip));
    }

    #[test]
    fn rejects_spaces_and_symbols_in_base_name() {
        let policy = FilePolicy::default();

        assert!(matches!(
            policy.validate("bad name!.zip"),
            Err(ValidationError::InvalidName { ref name }) if name == "bad name!.zip"
        ));
        assert!(matches!(policy.validate("résumé.zip"), Err(ValidationError::InvalidName { .. })));
        assert!(matches!(policy.validate(".zip"), Err(ValidationError::InvalidName { .. })));
    }

    #[test]
    fn rejects_nested_extensions_as_invalid_name() {
        let policy = FilePolicy::default();

        assert!(matches!(policy.validate("backup.tar.zip"), Err(ValidationError::InvalidName { .. })));
    }

    #[test]
    fn rejects_unaccepted_extensions() {
        let policy = FilePolicy::default();

        assert!(matches!(
            policy.validate("notes.txt"),
            Err(ValidationError::UnsupportedExtension { ref accepted, .. }) if accepted == "zip"
        ));
        assert!(matches!(
            policy.validate("archive"),
            Err(ValidationError::UnsupportedExtension { .. })
        ));
        assert!(matches!(
            policy.validate("archive.7z"),
            Err(ValidationError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn configured_formats_extend_the_policy() {
        let policy = FilePolicy::new(vec![ArchiveFormat::Zip, ArchiveFormat::SevenZip]);

        assert_eq!(policy.validate("archive.7z"), Ok(ArchiveFormat::SevenZip));
        assert_eq!(ArchiveFormat::SevenZip.content_type(), "application/x-7z-compressed");
    }

    #[test]
    fn compressed_tarballs_are_not_a_known_format() {
        let policy = FilePolicy::new(vec![ArchiveFormat::Zip, ArchiveFormat::Tar]);

        assert_eq!(ArchiveFormat::from_extension("gz"), None);
        assert_eq!(policy.validate("backup.tar"), Ok(ArchiveFormat::Tar));
        assert!(matches!(policy.validate("backup.tar.gz"), Err(ValidationError::InvalidName { .. })));
        assert!(matches!(
            policy.validate("backup.gz"),
            Err(ValidationError::UnsupportedExtension { ref accepted, .. }) if accepted == "zip/tar"
        ));
    }

    #[test]
    fn empty_format_list_falls_back_to_zip() {
        assert_eq!(FilePolicy::new(Vec::new()).accepted(), &[ArchiveFormat::Zip]);
    }
}
