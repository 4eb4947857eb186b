use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Extensions tried, in order, for a ROM name under `roms/`.
const EXTENSIONS: [&str; 3] = ["c8", "ch8", "chip8"];

/// # Rom
/// A ROM file on disk. Only the path is kept; the file is re-read whenever the machine resets.
#[derive(Debug, Clone)]
pub struct Rom {
    path: PathBuf,
}

impl Rom {
    /// Finds a ROM by name relative to the working directory.
    pub fn locate(name: &str) -> Result<Self, Box<dyn Error>> {
        Self::locate_in(Path::new(""), name)
    }

    /// Finds a ROM by name; the first candidate that is a file wins.
    pub fn locate_in(root: &Path, name: &str) -> Result<Self, Box<dyn Error>> {
        candidates(root, name)
            .into_iter()
            .find(|path| path.is_file())
            .map(|path| Rom { path })
            .ok_or_else(|| format!("unable to find ROM '{}'", name).into())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> io::Result<BufReader<File>> {
        Ok(BufReader::new(File::open(&self.path)?))
    }
}

impl fmt::Display for Rom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// `roms/<name>.c8`, `roms/<name>.ch8`, `roms/<name>.chip8`, `roms/<name>`, `<name>`
fn candidates(root: &Path, name: &str) -> Vec<PathBuf> {
    let roms = root.join("roms");
    EXTENSIONS
        .iter()
        .map(|extension| roms.join(format!("{}.{}", name, extension)))
        .chain([roms.join(name), root.join(name)])
        .collect()
}
