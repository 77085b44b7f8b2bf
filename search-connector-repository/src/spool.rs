//! Temporary storage for bulk document batches.
//!
//! A batch is written to an anonymous temporary file as a JSON array, one
//! document at a time, so its byte length is known before transmission while
//! only a single document is ever held in memory. The file is unlinked on
//! creation and released when the batch is dropped.

use std::io::SeekFrom;

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use crate::errors::SearchIndexError;

/// An open batch that documents can be appended to.
#[derive(Debug)]
pub struct SpooledBatch {
    file: File,
    byte_len: u64,
    document_count: usize,
}

impl SpooledBatch {
    /// Create an empty batch backed by a fresh temporary file.
    pub fn create() -> Result<Self, SearchIndexError> {
        let file = tempfile::tempfile()?;
        Ok(Self {
            file: File::from_std(file),
            byte_len: 0,
            document_count: 0,
        })
    }

    /// Append one document to the batch.
    pub async fn push<T: Serialize>(&mut self, document: &T) -> Result<(), SearchIndexError> {
        let mut bytes = Vec::with_capacity(512);
        bytes.push(if self.document_count == 0 { b'[' } else { b',' });
        serde_json::to_writer(&mut bytes, document)?;

        self.write(&bytes).await?;
        self.document_count += 1;
        Ok(())
    }

    /// Number of documents appended so far.
    pub fn len(&self) -> usize {
        self.document_count
    }

    pub fn is_empty(&self) -> bool {
        self.document_count == 0
    }

    /// Close the JSON array and rewind the file for reading.
    pub async fn seal(mut self) -> Result<SealedBatch, SearchIndexError> {
        let closing: &[u8] = if self.document_count == 0 { b"[]" } else { b"]" };
        self.write(closing).await?;
        self.file.flush().await?;
        self.file.seek(SeekFrom::Start(0)).await?;

        Ok(SealedBatch {
            file: self.file,
            byte_len: self.byte_len,
            document_count: self.document_count,
        })
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), SearchIndexError> {
        self.file.write_all(bytes).await?;
        self.byte_len += bytes.len() as u64;
        Ok(())
    }
}

/// A complete batch, ready to be sent as a request body.
#[derive(Debug)]
pub struct SealedBatch {
    file: File,
    byte_len: u64,
    document_count: usize,
}

impl SealedBatch {
    /// Exact size of the serialized JSON array in bytes.
    pub fn content_length(&self) -> u64 {
        self.byte_len
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Stream the batch file as a request body.
    pub fn into_body(self) -> reqwest::Body {
        reqwest::Body::from(self.file)
    }

    /// Read the whole batch back into memory.
    ///
    /// Meant for inspection in tests and mock providers.
    pub async fn read_to_string(mut self) -> Result<String, SearchIndexError> {
        let mut contents = String::with_capacity(self.byte_len as usize);
        self.file.read_to_string(&mut contents).await?;
        Ok(contents)
    }
}
