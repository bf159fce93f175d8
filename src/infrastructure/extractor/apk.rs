//! APK extractor
//!
//! Opens the package as a zip archive, decodes `AndroidManifest.xml` for the
//! package name, version name and label, and picks the best launcher PNG
//! from the packaged resources.
//!
//! Resource references are not resolved (that needs `resources.arsc`): a
//! label given as `@string/...` falls back to the package name, and the icon
//! is found by file name under `res/mipmap-*` / `res/drawable-*`.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use super::axml::{self, AttrValue};
use crate::domain::ports::{ArtifactExtractor, ExtractedArtifact, ExtractionError};

const MANIFEST: &str = "AndroidManifest.xml";
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const MAX_ICON_BYTES: u64 = 4 * 1024 * 1024;

const ATTR_LABEL: u32 = 0x0101_0001;
const ATTR_VERSION_NAME: u32 = 0x0101_021c;

/// Densities from best to worst.
const DENSITIES: &[&str] = &["xxxhdpi", "xxhdpi", "xhdpi", "hdpi", "mdpi", "ldpi"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ApkExtractor;

impl ApkExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_from<R: Read + Seek>(
        &self,
        reader: R,
    ) -> Result<ExtractedArtifact, ExtractionError> {
        let mut archive = ZipArchive::new(reader).map_err(archive_error)?;

        let manifest = read_entry(&mut archive, MANIFEST, u64::MAX)?.ok_or(
            ExtractionError::MissingEntry {
                entry: "AndroidManifest.xml",
            },
        )?;
        let elements = axml::parse_elements(&manifest).map_err(|e| ExtractionError::Manifest {
            message: e.to_string(),
        })?;

        let root = elements
            .iter()
            .find(|e| e.name == "manifest")
            .ok_or_else(|| ExtractionError::Manifest {
                message: "no <manifest> element".to_string(),
            })?;

        let package_name = root
            .attr("package", 0)
            .and_then(AttrValue::as_text)
            .unwrap_or_default();
        let version = root
            .attr("versionName", ATTR_VERSION_NAME)
            .and_then(AttrValue::as_text)
            .unwrap_or_default();

        let label = elements
            .iter()
            .find(|e| e.name == "application")
            .and_then(|app| app.attr("label", ATTR_LABEL))
            .and_then(AttrValue::as_text)
            .filter(|l| !l.trim().is_empty());
        let app_name = label.unwrap_or_else(|| package_name.clone());

        let icon_name = pick_icon(archive.file_names());
        let icon_png = match icon_name {
            Some(name) => read_entry(&mut archive, &name, MAX_ICON_BYTES)
                .ok()
                .flatten()
                .filter(|bytes| bytes.starts_with(PNG_SIGNATURE)),
            None => None,
        };

        Ok(ExtractedArtifact {
            app_name,
            package_name,
            version,
            icon_png,
        })
    }
}

impl ArtifactExtractor for ApkExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedArtifact, ExtractionError> {
        let file = File::open(path)?;
        let extracted = self.extract_from(BufReader::new(file))?;
        tracing::debug!(
            package = %extracted.package_name,
            version = %extracted.version,
            icon = extracted.icon_png.is_some(),
            "package metadata extracted"
        );
        Ok(extracted)
    }
}

fn archive_error(e: ZipError) -> ExtractionError {
    match e {
        ZipError::Io(io) => ExtractionError::Io(io),
        other => ExtractionError::Archive {
            message: other.to_string(),
        },
    }
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    limit: u64,
) -> Result<Option<Vec<u8>>, ExtractionError> {
    let entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(archive_error(e)),
    };
    if entry.size() > limit {
        return Ok(None);
    }
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.take(limit).read_to_end(&mut bytes)?;
    Ok(Some(bytes))
}

/// Best launcher icon among the archive entries: highest density first, the
/// plain `ic_launcher` ahead of its variants.
fn pick_icon<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    names
        .filter_map(|name| {
            let rest = name.strip_prefix("res/")?;
            let (dir, file) = rest.split_once('/')?;
            if !(dir.starts_with("mipmap") || dir.starts_with("drawable")) {
                return None;
            }
            let stem = file.strip_suffix(".png")?;
            if !stem.starts_with("ic_launcher") || stem.contains("foreground") || stem.contains("background") {
                return None;
            }
            let density = DENSITIES
                .iter()
                .position(|d| dir.split('-').any(|q| q == *d))
                .unwrap_or(DENSITIES.len());
            let variant = usize::from(stem != "ic_launcher");
            let kind = usize::from(!dir.starts_with("mipmap"));
            Some(((density, variant, kind), name.to_string()))
        })
        .min()
        .map(|(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::extractor::axml::fixture::{manifest, Elem, Value};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn png(tag: u8) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.push(tag);
        bytes
    }

    fn apk(entries: &[(&str, Vec<u8>)]) -> Cursor<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(bytes).unwrap();
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    fn standard_manifest(label: Value) -> Vec<u8> {
        manifest(&[
            Elem {
                name: "manifest",
                attrs: vec![
                    ("package", 0, Value::Str("com.example.app")),
                    ("versionName", ATTR_VERSION_NAME, Value::Str("1.4.0")),
                ],
            },
            Elem {
                name: "application",
                attrs: vec![("label", ATTR_LABEL, label)],
            },
        ])
    }

    #[test]
    fn extracts_identity_and_best_icon() {
        let reader = apk(&[
            (MANIFEST, standard_manifest(Value::Str("Example"))),
            ("res/mipmap-hdpi-v4/ic_launcher.png", png(1)),
            ("res/mipmap-xxhdpi-v4/ic_launcher_round.png", png(2)),
            ("res/mipmap-xxhdpi-v4/ic_launcher.png", png(3)),
            ("res/mipmap-anydpi-v26/ic_launcher.xml", b"<adaptive-icon/>".to_vec()),
        ]);

        let extracted = ApkExtractor::new().extract_from(reader).unwrap();
        assert_eq!(extracted.app_name, "Example");
        assert_eq!(extracted.package_name, "com.example.app");
        assert_eq!(extracted.version, "1.4.0");
        assert_eq!(extracted.icon_png, Some(png(3)));
    }

    #[test]
    fn referenced_label_falls_back_to_package_name() {
        let reader = apk(&[(MANIFEST, standard_manifest(Value::Ref(0x7f0f_001b)))]);

        let extracted = ApkExtractor::new().extract_from(reader).unwrap();
        assert_eq!(extracted.app_name, "com.example.app");
        assert_eq!(extracted.icon_png, None);
    }

    #[test]
    fn icon_without_png_signature_is_ignored() {
        let reader = apk(&[
            (MANIFEST, standard_manifest(Value::Str("Example"))),
            ("res/drawable-mdpi/ic_launcher.png", b"not a png".to_vec()),
        ]);
        let extracted = ApkExtractor::new().extract_from(reader).unwrap();
        assert_eq!(extracted.icon_png, None);
    }

    #[test]
    fn missing_manifest_is_reported() {
        let reader = apk(&[("classes.dex", vec![0u8; 4])]);
        let err = ApkExtractor::new().extract_from(reader).unwrap_err();
        assert!(matches!(err, ExtractionError::MissingEntry { .. }));
    }

    #[test]
    fn non_zip_input_is_an_archive_error() {
        let err = ApkExtractor::new()
            .extract_from(Cursor::new(b"definitely not a zip".to_vec()))
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Archive { .. } | ExtractionError::Io(_)
        ));
    }

    #[test]
    fn pick_icon_prefers_density_then_plain_name() {
        let names = [
            "res/drawable-xxxhdpi/ic_launcher_round.png",
            "res/mipmap-xxxhdpi/ic_launcher.png",
            "res/mipmap-xxxhdpi/ic_launcher_foreground.png",
            "res/drawable/icon.png",
        ];
        assert_eq!(
            pick_icon(names.into_iter()).as_deref(),
            Some("res/mipmap-xxxhdpi/ic_launcher.png")
        );
        assert_eq!(pick_icon(["assets/a.png"].into_iter()), None);
    }
}
