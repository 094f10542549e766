//! The archive manifest (`archive_files.json`).
//!
//! The engine splits its content archive into pieces and describes them in
//! a JSON manifest:
//!
//! ```text
//! { "content": [ { "name": "game.arcd", "size": 1234,
//!                  "pieces": [ { "name": "game.arcd0", "offset": 0 } ] } ],
//!   "total_size": 1234 }
//! ```
//!
//! Only piece names are ever rewritten. Content names, sizes, offsets and
//! the order of every list pass through untouched.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::with_piece_suffix;
use crate::{Error, Result};

/// Root of `archive_files.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Content items, in archive order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<ContentItem>,
    /// Sum of all content sizes. Not validated.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_size: i64,
}

/// One logical asset in the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Asset identifier, unique within the manifest.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Byte length of the reassembled asset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: i64,
    /// Pieces composing the asset, in order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pieces: Vec<Piece>,
}

/// One on-disk fragment of a content item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// File name of the fragment inside the archive directory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Offset of this fragment within the reassembled asset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: i64,
}

/// Decodes `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Manifest {
    /// Parses a manifest from JSON bytes.
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileIo`] if the file cannot be read and
    /// [`Error::Manifest`] if it is not a valid manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = crate::fs::read(path)?;
        Self::from_slice(&data).map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serializes the manifest with four-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    /// Serializes the manifest and writes it to `path`.
    ///
    /// Returns the number of bytes written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let data = self.to_pretty_json().map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        crate::fs::write(path, &data)
    }

    /// Appends the piece suffix to every piece name that lacks it.
    ///
    /// Idempotent. Returns the number of names changed.
    pub fn suffix_pieces(&mut self) -> usize {
        let mut renamed = 0;
        for piece in self.pieces_mut() {
            if let Some(name) = with_piece_suffix(&piece.name) {
                piece.name = name;
                renamed += 1;
            }
        }
        renamed
    }

    /// Iterates over every piece of every content item.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.content.iter().flat_map(|item| item.pieces.iter())
    }

    fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.content.iter_mut().flat_map(|item| item.pieces.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"content":[{"name":"a","size":10,"pieces":[{"name":"p1","offset":0},{"name":"p1.bin","offset":5}]}],"total_size":10}"#;

    #[test]
    fn suffixes_only_unsuffixed_pieces() {
        let mut manifest = Manifest::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(manifest.suffix_pieces(), 1);

        let names: Vec<_> = manifest.pieces().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p1.bin", "p1.bin"]);

        let item = &manifest.content[0];
        assert_eq!(item.name, "a");
        assert_eq!(item.size, 10);
        assert_eq!(item.pieces[0].offset, 0);
        assert_eq!(item.pieces[1].offset, 5);
        assert_eq!(manifest.total_size, 10);
    }

    #[test]
    fn suffixing_twice_changes_nothing() {
        let mut once = Manifest::from_slice(SAMPLE.as_bytes()).unwrap();
        once.suffix_pieces();
        let mut twice = once.clone();
        assert_eq!(twice.suffix_pieces(), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn content_names_are_never_suffixed() {
        let mut manifest = Manifest::from_slice(SAMPLE.as_bytes()).unwrap();
        manifest.suffix_pieces();
        assert_eq!(manifest.content[0].name, "a");
    }

    #[test]
    fn pretty_output_uses_four_spaces() {
        let manifest = Manifest {
            content: vec![ContentItem {
                name: "game.arcd".into(),
                size: 3,
                pieces: vec![Piece {
                    name: "game.arcd0.bin".into(),
                    offset: 0,
                }],
            }],
            total_size: 3,
        };
        let json = String::from_utf8(manifest.to_pretty_json().unwrap()).unwrap();
        let expected = r#"{
    "content": [
        {
            "name": "game.arcd",
            "size": 3,
            "pieces": [
                {
                    "name": "game.arcd0.bin",
                    "offset": 0
                }
            ]
        }
    ],
    "total_size": 3
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn missing_fields_default_and_unknown_fields_are_dropped() {
        let manifest =
            Manifest::from_slice(br#"{"content":[{"name":"x","extra":true}],"version":2}"#)
                .unwrap();
        assert_eq!(manifest.total_size, 0);
        assert_eq!(manifest.content[0].size, 0);
        assert!(manifest.content[0].pieces.is_empty());
    }

    #[test]
    fn null_lists_and_negative_numbers_are_accepted() {
        let mut manifest = Manifest::from_slice(
            br#"{"content":[{"name":"a","size":-1,"pieces":null},{"name":null,"pieces":[{"name":"p","offset":-4}]}],"total_size":-1}"#,
        )
        .unwrap();
        assert_eq!(manifest.total_size, -1);
        assert_eq!(manifest.content[0].size, -1);
        assert!(manifest.content[0].pieces.is_empty());
        assert_eq!(manifest.content[1].name, "");
        assert_eq!(manifest.content[1].pieces[0].offset, -4);

        assert_eq!(manifest.suffix_pieces(), 1);
        assert_eq!(manifest.content[1].pieces[0].name, "p.bin");

        let empty = Manifest::from_slice(br#"{"content":null,"total_size":null}"#).unwrap();
        assert_eq!(empty, Manifest::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(Manifest::from_slice(b"{\"content\": [").is_err());
        assert!(Manifest::from_slice(br#"{"content": "nope"}"#).is_err());
    }

    #[test]
    fn empty_content_round_trips() {
        let manifest = Manifest::from_slice(br#"{"content":[],"total_size":0}"#).unwrap();
        let json = String::from_utf8(manifest.to_pretty_json().unwrap()).unwrap();
        assert_eq!(json, "{\n    \"content\": [],\n    \"total_size\": 0\n}");
    }
}
