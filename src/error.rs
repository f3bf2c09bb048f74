// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MylogError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage fault: {0}")]
    StorageFault(#[from] rusqlite::Error),

    #[error("Storage fault: database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },

    #[error("Storage fault: invalid persisted entry: {0}")]
    CorruptEntry(String),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Editor exited with a non-zero status")]
    EditorError,

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MylogError {
    /// True when the durable store could not complete the requested operation.
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::StorageFault(_) | Self::UnsupportedSchemaVersion { .. } | Self::CorruptEntry(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MylogError>;

#[cfg(test)]
mod tests {
    use super::MylogError;

    #[test]
    fn storage_variants_are_classified_as_faults() {
        let sql = MylogError::from(rusqlite::Error::InvalidQuery);
        assert!(sql.is_storage_fault());
        assert!(MylogError::CorruptEntry("bad id".into()).is_storage_fault());
        assert!(MylogError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 2
        }
        .is_storage_fault());

        assert!(!MylogError::HomeDirNotFound.is_storage_fault());
        assert!(!MylogError::InvalidInput("x".into()).is_storage_fault());
    }

    #[test]
    fn display_keeps_storage_fault_prefix() {
        let err = MylogError::UnsupportedSchemaVersion {
            db_version: 7,
            latest_supported: 2,
        };
        assert_eq!(
            err.to_string(),
            "Storage fault: database schema version 7 is newer than supported 2"
        );
    }
}
