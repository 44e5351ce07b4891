use crate::AssetPath;

/**
 * A method of receiving bytes from files.
 * IE: file, raw, etc.
 */
pub trait Protocol: Send + Sync + 'static {
    /**
     * Name of the protocol. IE: file, raw etc.
     * Should not change across invocations.
     */
    fn name(&self) -> &str;
    /**
     * Retrieves raw bytes from the path specified.
     */
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>>;
}

/**
 * An implementation of [`Protocol`] that fetches bytes from the file system.
 */
#[derive(Copy, Clone, Debug)]
pub struct FileProtocol;
impl Protocol for FileProtocol {
    fn name(&self) -> &str { "file" }
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let bytes = std::fs::read(path.without_protocol())?;
        Ok(bytes)
    }
}

/**
 * An implementation of [`Protocol`] that serves files from memory, keyed by path without protocol.
 * Useful for testing purposes.
 */
#[derive(Clone, Default, Debug)]
pub struct RawProtocol {
    files: Vec<(String, &'static [u8])>,
}

impl RawProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, bytes: &'static [u8]) -> Self {
        self.files.push((path.into(), bytes));
        self
    }
}

impl Protocol for RawProtocol {
    fn name(&self) -> &str { "raw" }
    fn read(&self, path: &AssetPath) -> anyhow::Result<Vec<u8>> {
        let key = path.without_protocol();
        self.files
            .iter()
            .find(|(file_path, _)| *file_path == key)
            .map(|(_, bytes)| bytes.to_vec())
            .ok_or_else(|| anyhow::Error::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no raw file at '{key}'"),
            )))
    }
}
