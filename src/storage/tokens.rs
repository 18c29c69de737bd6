//! Token persistence
//!
//! The client only ever needs two things from a credential cache: read the
//! token once at startup, and write it once after a fresh grant.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use log::{info, warn};

use super::file_io::{read_json_optional, write_private_json_atomic};
use crate::error::{SplitrError, SplitrResult};
use crate::models::Token;

/// Somewhere a token can be cached between runs
pub trait TokenStore {
    /// Return the cached token, or `None` if there isn't a usable one
    fn load(&self) -> SplitrResult<Option<Token>>;

    /// Persist a freshly granted token
    fn save(&self, token: &Token) -> SplitrResult<()>;
}

/// Token cache backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> SplitrResult<Option<Token>> {
        match read_json_optional::<Token, _>(&self.path) {
            Ok(Some(token)) => {
                info!("Loading credentials from disk");
                Ok(Some(token))
            }
            Ok(None) => Ok(None),
            // A corrupt cache is replaced by the next successful grant
            Err(SplitrError::Json(e)) => {
                warn!("Ignoring unreadable credential cache: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &Token) -> SplitrResult<()> {
        write_private_json_atomic(&self.path, token)
    }
}

/// Token cache held in memory, for tests and one-off runs
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<Token>>,
    saves: Cell<usize>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        Self {
            token: RefCell::new(Some(token)),
            saves: Cell::new(0),
        }
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn token(&self) -> Option<Token> {
        self.token.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> SplitrResult<Option<Token>> {
        Ok(self.token.borrow().clone())
    }

    fn save(&self, token: &Token) -> SplitrResult<()> {
        *self.token.borrow_mut() = Some(token.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
