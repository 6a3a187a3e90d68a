//! Batch uploads: one comment per line.

use std::path::Path;

use crate::error::{ClientError, Result};

/// Split uploaded text into comments. Lines are trimmed and blank lines dropped.
pub fn parse_batch_input(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a `.txt` or `.csv` upload from disk.
pub async fn parse_batch_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        ClientError::InvalidInput(format!("Cannot read '{}': {e}", path.display()))
    })?;
    let comments = parse_batch_input(&text);
    tracing::debug!(path = %path.display(), comments = comments.len(), "batch file loaded");
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_trims_and_drops_blank_lines() {
        let comments = parse_batch_input("  first comment \n\n\tsecond\r\n   \nthird");
        assert_eq!(comments, vec!["first comment", "second", "third"]);
        assert!(parse_batch_input("\n \n").is_empty());
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "great video").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "you are trash").unwrap();
        let comments = parse_batch_file(file.path()).await.unwrap();
        assert_eq!(comments, vec!["great video", "you are trash"]);
    }

    #[tokio::test]
    async fn missing_file_is_invalid_input() {
        let err = parse_batch_file("/definitely/not/here.txt").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }
}
