//! Writing the regional dex
//!
//! The document is fully serialized before the destination is touched, then
//! swapped in through a temporary file in the same directory.

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fs::Permissions;
use std::io::{self, Write};
use std::path::Path;

use crate::config::DexConfig;
use crate::error::DexError;
use crate::models::Record;
use crate::prompt::Prompter;

/// How the regional dex is laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStyle<'a> {
    /// Indentation unit
    pub indent: &'a str,
    /// Escape every non-ASCII character as `\uXXXX`
    pub ensure_ascii: bool,
}

impl<'a> JsonStyle<'a> {
    pub fn from_config(config: &'a DexConfig) -> Self {
        Self {
            indent: &config.indent,
            ensure_ascii: config.ensure_ascii,
        }
    }
}

/// Pretty printer that writes non-ASCII characters as lowercase `\uXXXX`
/// escapes, using UTF-16 surrogate pairs outside the BMP
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

fn serialize_with<F: Formatter>(records: &[Record], formatter: F) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;
    Ok(buf)
}

/// Serialize `records` as an indented JSON array, keeping key order
pub fn to_json_string(records: &[Record], style: JsonStyle<'_>) -> Result<String> {
    let pretty = PrettyFormatter::with_indent(style.indent.as_bytes());
    let buf = if style.ensure_ascii {
        serialize_with(records, AsciiFormatter { inner: pretty })?
    } else {
        serialize_with(records, pretty)?
    };

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8(buf)?)
}

/// Ask before replacing an existing destination.
///
/// Returns `Ok(())` when the path is free, when `force` is set, or when the
/// user answers yes; [`DexError::OverwriteDeclined`] otherwise.
pub fn confirm_overwrite(path: &Path, force: bool, prompter: &mut dyn Prompter) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if force {
        log::info!("Overwriting {} (--force)", path.display());
        return Ok(());
    }

    let question = format!("{} already exists. Overwrite? (y/N) ", path.display());
    if prompter.confirm(&question, false)? {
        Ok(())
    } else {
        Err(DexError::OverwriteDeclined {
            path: path.to_path_buf(),
        }
        .into())
    }
}

/// Permissions for the written dex: those of the file being replaced, or
/// `0644` for a new one. `None` leaves the temp file's own permissions.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Write `records` to `path`, replacing it atomically
pub fn write_dex(path: &Path, records: &[Record], style: JsonStyle<'_>) -> Result<()> {
    let json = to_json_string(records, style)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| DexError::from_io(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| DexError::from_io(dir, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| DexError::from_io(tmp.path(), e))?;
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| DexError::from_io(tmp.path(), e))?;
    }
    tmp.persist(path)
        .map_err(|e| DexError::from_io(path, e.error))?;

    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;
    use serde_json::json;
    use tempfile::TempDir;

    const TABS: JsonStyle<'static> = JsonStyle {
        indent: "\t",
        ensure_ascii: true,
    };

    fn records() -> Vec<Record> {
        serde_json::from_value(json!([
            {"name": "Pikachu", "id": 25},
            {"name": "Raichu", "forms": [{"name": "Raichu"}, {"name": "Alolan Raichu", "spriteSuffix": "alola"}]}
        ]))
        .unwrap()
    }

    #[test]
    fn test_tab_indented_output() {
        let records: Vec<Record> = serde_json::from_value(json!([{"name": "Mew", "id": 151}])).unwrap();
        let out = to_json_string(&records, TABS).unwrap();
        assert_eq!(out, "[\n\t{\n\t\t\"name\": \"Mew\",\n\t\t\"id\": 151\n\t}\n]");
    }

    #[test]
    fn test_custom_indent() {
        let records: Vec<Record> = serde_json::from_value(json!([{"name": "Mew"}])).unwrap();
        let style = JsonStyle {
            indent: "  ",
            ..TABS
        };
        let out = to_json_string(&records, style).unwrap();
        assert_eq!(out, "[\n  {\n    \"name\": \"Mew\"\n  }\n]");
    }

    #[test]
    fn test_non_ascii_escaped_like_json_dump() {
        let records: Vec<Record> =
            serde_json::from_value(json!([{"name": "Flabébé", "note": "Pokémon 🐉"}])).unwrap();
        let out = to_json_string(&records, TABS).unwrap();
        assert_eq!(
            out,
            "[\n\t{\n\t\t\"name\": \"Flab\\u00e9b\\u00e9\",\n\t\t\"note\": \"Pok\\u00e9mon \\ud83d\\udc09\"\n\t}\n]"
        );

        let read: Vec<Record> = serde_json::from_str(&out).unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn test_non_ascii_kept_raw_when_disabled() {
        let records: Vec<Record> = serde_json::from_value(json!([{"name": "Flabébé"}])).unwrap();
        let style = JsonStyle {
            ensure_ascii: false,
            ..TABS
        };
        let out = to_json_string(&records, style).unwrap();
        assert!(out.contains("\"Flabébé\""));
    }

    #[test]
    fn test_escapes_still_applied_to_control_characters() {
        let records: Vec<Record> = serde_json::from_value(json!([{"name": "a\"b\n"}])).unwrap();
        let out = to_json_string(&records, TABS).unwrap();
        assert!(out.contains(r#""a\"b\n""#));
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanto.json");
        std::fs::write(&path, "[]").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(0o664)).unwrap();

        write_dex(&path, &records(), TABS).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("johto.json");

        write_dex(&path, &records(), TABS).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_write_then_read_is_identical() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanto.json");

        write_dex(&path, &records(), TABS).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let read: Vec<Record> = serde_json::from_str(&text).unwrap();
        assert_eq!(read, records());
        assert_eq!(to_json_string(&read, TABS).unwrap(), text);
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("public").join("dex").join("johto.json");

        write_dex(&path, &records(), TABS).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_confirm_overwrite_free_path() {
        let temp = TempDir::new().unwrap();
        let mut prompter = ScriptedPrompter::default();

        confirm_overwrite(&temp.path().join("new.json"), false, &mut prompter).unwrap();
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_confirm_overwrite_declined_by_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanto.json");
        std::fs::write(&path, "[]").unwrap();
        let mut prompter = ScriptedPrompter::new([""]);

        let err = confirm_overwrite(&path, false, &mut prompter).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DexError>(),
            Some(DexError::OverwriteDeclined { .. })
        ));
        assert!(prompter.asked[0].ends_with("already exists. Overwrite? (y/N) "));
    }

    #[test]
    fn test_confirm_overwrite_accepted_or_forced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanto.json");
        std::fs::write(&path, "[]").unwrap();

        let mut prompter = ScriptedPrompter::new(["Y"]);
        confirm_overwrite(&path, false, &mut prompter).unwrap();

        let mut silent = ScriptedPrompter::default();
        confirm_overwrite(&path, true, &mut silent).unwrap();
        assert!(silent.asked.is_empty());
    }
}
