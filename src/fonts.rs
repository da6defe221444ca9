//! System font discovery
//!
//! Scans the platform font directories for `.ttf`, `.otf` and `.ttc` files
//! and groups them into families by file name. Only the regular face of a
//! family is kept; bold and italic are synthesized when drawing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// How deep below a font directory to look
const MAX_SCAN_DEPTH: usize = 5;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Families tried, in order, when no preference is configured
const PREFERRED_DEFAULTS: &[&str] = &[
    "DejaVuSans",
    "LiberationSans",
    "NotoSans",
    "Ubuntu",
    "Cantarell",
    "SegoeUI",
    "Arial",
    "Helvetica",
    "SFNS",
];

/// Style suffixes stripped from file stems (`DejaVuSans-Bold` -> `DejaVuSans`)
const STYLE_SUFFIXES: &[&str] = &[
    "regular",
    "book",
    "roman",
    "normal",
    "bold",
    "italic",
    "oblique",
    "bolditalic",
    "boldoblique",
    "light",
    "lightitalic",
    "medium",
    "mediumitalic",
    "semibold",
    "semibolditalic",
    "extrabold",
    "extralight",
    "thin",
    "black",
    "condensed",
];

const REGULAR_SUFFIXES: &[&str] = &["regular", "book", "roman", "normal"];

/// One loadable font file standing for a family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    pub path: PathBuf,
}

/// Split a file stem into its family name and whether it is a regular face
fn family_of(stem: &str) -> (String, bool) {
    if let Some((family, suffix)) = stem.rsplit_once('-') {
        let suffix = suffix.to_ascii_lowercase();
        if !family.is_empty() && STYLE_SUFFIXES.contains(&suffix.as_str()) {
            return (family.to_string(), REGULAR_SUFFIXES.contains(&suffix.as_str()));
        }
    }
    (stem.to_string(), true)
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Font directories of the current platform that exist
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "linux")]
    {
        candidates.push(PathBuf::from("/usr/share/fonts"));
        candidates.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".fonts"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        candidates.push(PathBuf::from("/System/Library/Fonts"));
        candidates.push(PathBuf::from("/Library/Fonts"));
    }

    #[cfg(target_os = "windows")]
    {
        let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
        candidates.push(PathBuf::from(windir).join("Fonts"));
    }

    if let Some(user_fonts) = dirs::font_dir() {
        candidates.push(user_fonts);
    }

    let mut dirs = Vec::new();
    for dir in candidates {
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// Font families available to the editor, sorted by name
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    faces: BTreeMap<String, FontFace>,
}

impl FontCatalog {
    /// Scan the system font directories
    pub fn discover() -> Self {
        let dirs = system_font_dirs();
        let catalog = Self::from_dirs(&dirs);
        tracing::info!(
            "Discovered {} font families in {} directories",
            catalog.len(),
            dirs.len()
        );
        catalog
    }

    /// Scan the given directories recursively
    pub fn from_dirs(dirs: &[PathBuf]) -> Self {
        let mut files = Vec::new();
        for dir in dirs {
            collect_font_files(dir, 0, &mut files);
        }
        files.sort();
        Self::from_files(files)
    }

    /// Build from a list of font file paths
    pub fn from_files(files: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut faces: BTreeMap<String, FontFace> = BTreeMap::new();
        let mut regular: BTreeMap<String, bool> = BTreeMap::new();

        for path in files.into_iter().filter(|p| is_font_file(p)) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let (family, is_regular) = family_of(stem);
            let had_regular = regular.get(&family).copied();
            match had_regular {
                // A regular face replaces a styled one found earlier
                Some(false) if is_regular => {}
                Some(_) => continue,
                None => {}
            }
            regular.insert(family.clone(), is_regular);
            faces.insert(family.clone(), FontFace { family, path });
        }

        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Family names, sorted
    pub fn families(&self) -> Vec<String> {
        self.faces.keys().cloned().collect()
    }

    /// Look up a family, ignoring ASCII case
    pub fn find(&self, family: &str) -> Option<&FontFace> {
        self.faces.get(family).or_else(|| {
            self.faces
                .values()
                .find(|face| face.family.eq_ignore_ascii_case(family))
        })
    }

    /// The family unformatted text uses
    ///
    /// `preferred` wins when installed, then a list of common sans-serif
    /// families, then whatever sorts first.
    pub fn default_family(&self, preferred: Option<&str>) -> Option<&FontFace> {
        if let Some(face) = preferred.and_then(|family| self.find(family)) {
            return Some(face);
        }
        PREFERRED_DEFAULTS
            .iter()
            .find_map(|family| self.find(family))
            .or_else(|| self.faces.values().next())
    }
}

fn collect_font_files(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping font directory {}: {}", dir.display(), e);
            return;
        }
    };
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.is_dir() {
            collect_font_files(&path, depth + 1, out);
        } else if is_font_file(&path) {
            out.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_of_strips_style_suffix() {
        assert_eq!(family_of("DejaVuSans-Bold"), ("DejaVuSans".to_string(), false));
        assert_eq!(family_of("Ubuntu-Regular"), ("Ubuntu".to_string(), true));
        assert_eq!(family_of("Arial"), ("Arial".to_string(), true));
        assert_eq!(family_of("Noto-Emoji"), ("Noto-Emoji".to_string(), true));
    }

    #[test]
    fn test_regular_face_wins() {
        let catalog = FontCatalog::from_files(vec![
            PathBuf::from("/f/DejaVuSans-Bold.ttf"),
            PathBuf::from("/f/DejaVuSans.ttf"),
            PathBuf::from("/f/DejaVuSans-Oblique.ttf"),
            PathBuf::from("/f/readme.txt"),
        ]);
        assert_eq!(catalog.families(), vec!["DejaVuSans"]);
        assert_eq!(
            catalog.find("dejavusans").map(|f| f.path.clone()),
            Some(PathBuf::from("/f/DejaVuSans.ttf"))
        );
    }

    #[test]
    fn test_default_family_order() {
        let catalog = FontCatalog::from_files(vec![
            PathBuf::from("/f/Aardvark.ttf"),
            PathBuf::from("/f/LiberationSans-Regular.ttf"),
        ]);
        assert_eq!(
            catalog.default_family(None).map(|f| f.family.as_str()),
            Some("LiberationSans")
        );
        assert_eq!(
            catalog.default_family(Some("aardvark")).map(|f| f.family.as_str()),
            Some("Aardvark")
        );
        assert_eq!(
            catalog.default_family(Some("Missing")).map(|f| f.family.as_str()),
            Some("LiberationSans")
        );
        assert!(FontCatalog::default().default_family(None).is_none());
    }

    #[test]
    fn test_from_dirs_scans_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("truetype").join("sans");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("Sample-Regular.TTF"), b"").unwrap();
        std::fs::write(dir.path().join("notes.md"), b"").unwrap();

        let catalog = FontCatalog::from_dirs(&[dir.path().to_path_buf()]);
        assert_eq!(catalog.families(), vec!["Sample"]);
    }
}
