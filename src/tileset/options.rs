use std::path::Path;
use serde::Deserialize;

/// What to do when two <tile> elements share an id.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the load with a format error.
    #[default]
    Reject,
    /// The later tile replaces the earlier one, keeping the earlier position.
    LastWins,
}

/// What to do with a tile that has a reference error.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidTilePolicy {
    /// Fail the load.
    #[default]
    Fail,
    /// Drop the tile and record it in [`TilesetDescriptor::skipped`](crate::tileset::TilesetDescriptor::skipped).
    Skip,
}

/// Knobs for loading a tileset.
/// Defaults are strict.
///
/// ```yaml
/// duplicate_ids: last-wins
/// invalid_tiles: skip
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    pub duplicate_ids: DuplicatePolicy,
    pub invalid_tiles: InvalidTilePolicy,
}

impl LoadOptions {

    /// Tolerates duplicates and broken tiles.
    pub fn lenient() -> Self {
        Self {
            duplicate_ids: DuplicatePolicy::LastWins,
            invalid_tiles: InvalidTilePolicy::Skip,
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&source)?)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use super::{DuplicatePolicy, InvalidTilePolicy, LoadOptions};

    #[test]
    fn defaults_are_strict() {
        let options = LoadOptions::default();
        assert_eq!(DuplicatePolicy::Reject, options.duplicate_ids);
        assert_eq!(InvalidTilePolicy::Fail, options.invalid_tiles);
        assert_eq!(options, LoadOptions::from_yaml("{}").unwrap());
    }

    #[test]
    fn partial_yaml() {
        let options = LoadOptions::from_yaml("invalid_tiles: skip\n").unwrap();
        assert_eq!(DuplicatePolicy::Reject, options.duplicate_ids);
        assert_eq!(InvalidTilePolicy::Skip, options.invalid_tiles);
    }

    #[test]
    fn full_yaml() {
        let yaml =
"duplicate_ids: last-wins
invalid_tiles: skip
";
        assert_eq!(LoadOptions::lenient(), LoadOptions::from_yaml(yaml).unwrap());
    }

    #[test]
    fn rejects_unknown() {
        assert!(LoadOptions::from_yaml("duplicate_ids: first-wins\n").is_err());
        assert!(LoadOptions::from_yaml("strictness: high\n").is_err());
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "duplicate_ids: last-wins").unwrap();
        let options = LoadOptions::from_file(file.path()).unwrap();
        assert_eq!(DuplicatePolicy::LastWins, options.duplicate_ids);
        assert_eq!(InvalidTilePolicy::Fail, options.invalid_tiles);
    }
}
