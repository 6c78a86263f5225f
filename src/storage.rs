use crate::model::Board;
use anyhow::{anyhow, Context};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le board ; un support vide donne un board vide.
    fn load(&self) -> anyhow::Result<Board>;
    /// Sauvegarde de manière atomique : tout le board ou rien.
    fn save(&self, board: &Board) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Board> {
        if !self.path.exists() {
            return Ok(Board::default());
        }
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let board: Board = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(board)
    }

    fn save(&self, board: &Board) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(board)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

/// Stockage en mémoire (tests, intégration embarquée).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    board: Mutex<Board>,
}

impl MemoryStorage {
    pub fn new(board: Board) -> Self {
        Self {
            board: Mutex::new(board),
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> anyhow::Result<Board> {
        let guard = self.board.lock().map_err(|_| anyhow!("memory storage poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, board: &Board) -> anyhow::Result<()> {
        let mut guard = self.board.lock().map_err(|_| anyhow!("memory storage poisoned"))?;
        *guard = board.clone();
        Ok(())
    }
}
