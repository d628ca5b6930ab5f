use std::path::{Path, PathBuf};

/// The bundled preset tracks, as `(display name, path relative to the assets root)`.
const BUILTIN_TRACKS: [(&str, &str); 3] = [
    ("Calm Beat", "music/calm.mp3"),
    ("Upbeat Tune", "music/upbeat.mp3"),
    ("Cinematic", "music/cinematic.mp3"),
];

/// Read-only table of named preset music tracks.
///
/// Built once at startup from an assets root directory; requests look tracks up
/// by display name and never mutate the table.
#[derive(Clone, Debug)]
pub struct MusicLibrary {
    root: PathBuf,
    tracks: Vec<(String, PathBuf)>,
}

impl MusicLibrary {
    /// Build the library of bundled tracks under `root`.
    pub fn builtin(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tracks: BUILTIN_TRACKS
                .iter()
                .map(|(name, rel)| (name.to_string(), PathBuf::from(rel)))
                .collect(),
        }
    }

    /// Resolve a preset name to its bundled file path.
    pub fn lookup(&self, name: &str) -> Option<PathBuf> {
        self.tracks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rel)| self.root.join(rel))
    }

    /// Preset names in presentation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|(n, _)| n.as_str())
    }

    /// The assets root this library resolves against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_named_tracks() {
        let lib = MusicLibrary::builtin("assets");
        let names: Vec<&str> = lib.names().collect();
        assert_eq!(names, ["Calm Beat", "Upbeat Tune", "Cinematic"]);
    }

    #[test]
    fn lookup_joins_root() {
        let lib = MusicLibrary::builtin("/data/assets");
        let p = lib.lookup("Calm Beat").unwrap();
        assert_eq!(p, PathBuf::from("/data/assets/music/calm.mp3"));
        assert!(lib.lookup("None").is_none());
        assert!(lib.lookup("calm beat").is_none());
    }
}
