//! Plain-text transcript files.
//!
//! One file per session, named `<slug>_<NNN>_<YYYYMMDD-HHMMSS>.txt`, with one
//! `"<speaker>: <text>"` line per message written as the conversation goes.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use charchat_core::chat::transcript::TranscriptSink;
use charchat_types::error::TranscriptError;

/// Turn a character name into a file-name-safe slug.
///
/// Lower-cases the name and collapses every run of non-alphanumeric
/// characters into a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "character".to_string()
    } else {
        slug.to_string()
    }
}

/// Counter embedded in a transcript file name for `slug`, if it is one.
fn parse_counter(file_name: &str, slug: &str) -> Option<u32> {
    let rest = file_name.strip_prefix(slug)?.strip_prefix('_')?;
    let (counter, _) = rest.split_once('_')?;
    counter.parse().ok()
}

/// One more than the highest counter already used for `slug` in `dir`.
async fn next_counter(dir: &Path, slug: &str) -> Result<u32, TranscriptError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| TranscriptError::Directory(format!("{}: {e}", dir.display())))?;

    let mut highest = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| TranscriptError::Directory(format!("{}: {e}", dir.display())))?
    {
        if let Some(counter) = entry.file_name().to_str().and_then(|n| parse_counter(n, slug)) {
            highest = highest.max(counter);
        }
    }
    Ok(highest + 1)
}

/// Transcript sink writing to a text file.
#[derive(Debug)]
pub struct FileTranscript {
    path: PathBuf,
    file: Option<File>,
}

impl FileTranscript {
    /// Create a new transcript file for `character` in `dir`.
    pub async fn create(dir: &Path, character: &str) -> Result<Self, TranscriptError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| TranscriptError::Directory(format!("{}: {e}", dir.display())))?;

        let slug = slugify(character);
        let counter = next_counter(dir, &slug).await?;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("{slug}_{counter:03}_{stamp}.txt"));

        let file = OpenOptions::new()
            .create_new(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| TranscriptError::Write(format!("{}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), "transcript opened");
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptSink for FileTranscript {
    fn is_active(&self) -> bool {
        self.file.is_some()
    }

    async fn append(&mut self, speaker: &str, text: &str) -> Result<(), TranscriptError> {
        let file = self.file.as_mut().ok_or(TranscriptError::Finished)?;
        let line = format!("{speaker}: {text}\n");
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| TranscriptError::Write(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| TranscriptError::Write(e.to_string()))
    }

    async fn finish(&mut self, keep: bool) -> Result<(), TranscriptError> {
        let mut file = self.file.take().ok_or(TranscriptError::Finished)?;
        file.flush()
            .await
            .map_err(|e| TranscriptError::Write(e.to_string()))?;
        drop(file);

        if keep {
            tracing::info!(path = %self.path.display(), "transcript kept");
        } else {
            tokio::fs::remove_file(&self.path)
                .await
                .map_err(|e| TranscriptError::Remove(format!("{}: {e}", self.path.display())))?;
            tracing::info!(path = %self.path.display(), "transcript discarded");
        }
        Ok(())
    }
}
