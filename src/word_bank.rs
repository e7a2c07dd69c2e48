//! Loading the words the solver may place.
//!
//! Words come either from an in-memory string (the only option in WebAssembly
//! builds, where the browser hands over file contents) or, natively, from a
//! file path.
//!
//! The format is one word per line. Surrounding whitespace is trimmed, blank
//! lines are skipped and repeated words are kept once, at their first
//! position. Words are otherwise taken as written: no case folding and no
//! character filtering, unless the caller asks for [`WordBank::uppercased`].

use log::debug;
use std::collections::HashSet;

/// Distinct words in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBank {
    pub words: Vec<String>,
}

impl WordBank {
    /// Parse a word bank from an in-memory string. WASM-safe.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordBank {
        let words = dedup_in_order(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );

        debug!("parsed {} distinct words", words.len());
        WordBank { words }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` naming `path` if the file cannot be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordBank> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(e.kind(), format!("failed to read word bank from '{}': {}", path_ref.display(), e))
        })?;

        Ok(Self::parse_from_str(&data))
    }

    /// Upper-case every word. Words that collide after folding are kept once.
    #[must_use]
    pub fn uppercased(self) -> WordBank {
        WordBank { words: dedup_in_order(self.words.into_iter().map(|w| w.to_uppercase())) }
    }

    /// Borrowed view for [`crate::solver::solve`].
    #[must_use]
    pub fn as_refs(&self) -> Vec<&str> {
        self.words.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WordBank {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        WordBank { words: dedup_in_order(iter.into_iter().map(Into::into)) }
    }
}

fn dedup_in_order(words: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words.filter(|w| seen.insert(w.clone())).collect()
}
