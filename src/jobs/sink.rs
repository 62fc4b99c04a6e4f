//! Append-only line logs the jobs write their results to.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

#[async_trait]
pub trait LogSink: Send + Sync {
    /// Appends `lines`, each terminated by a newline, in one write.
    async fn write_lines(&self, lines: &[String]) -> std::io::Result<()>;
}

/// Appends to a file, creating it on first write.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn write_lines(&self, lines: &[String]) -> std::io::Result<()> {
        let mut buffer = String::new();
        for line in lines {
            buffer.push_str(line);
            buffer.push('\n');
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(buffer.as_bytes()).await?;
        file.flush().await
    }
}

/// Keeps lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn write_lines(&self, lines: &[String]) -> std::io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(lines);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("job.log"));

        sink.write_lines(&["first".into()]).await.unwrap();
        sink.write_lines(&["second".into(), "third".into()]).await.unwrap();

        let content = tokio::fs::read_to_string(sink.path()).await.unwrap();
        assert_eq!(content, "first\nsecond\nthird\n");
    }
}
