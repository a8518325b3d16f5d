use super::DataReaderTrait;
use crate::Blob;
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads a whole file from the local filesystem.
#[derive(Debug)]
pub struct DataReaderFile {
	path: PathBuf,
	name: String,
}

impl DataReaderFile {
	/// Creates a reader for an existing regular file.
	pub fn open(path: &Path) -> Result<Box<DataReaderFile>> {
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "path {path:?} must be a file");

		Ok(Box::new(DataReaderFile {
			path: path.to_path_buf(),
			name: path.to_string_lossy().to_string(),
		}))
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderFile {
	async fn read_all(&self) -> Result<Blob> {
		let bytes = tokio::fs::read(&self.path)
			.await
			.with_context(|| format!("reading file {:?}", self.path))?;
		Ok(Blob::from(bytes))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[tokio::test]
	async fn read_existing_file() -> Result<()> {
		let mut file = NamedTempFile::new()?;
		write!(file, "{{\"type\":\"FeatureCollection\",\"features\":[]}}")?;

		let reader = DataReaderFile::open(file.path())?;
		let blob = reader.read_all().await?;
		assert_eq!(blob.to_str()?, "{\"type\":\"FeatureCollection\",\"features\":[]}");
		assert_eq!(reader.get_name(), file.path().to_string_lossy());
		Ok(())
	}

	#[test]
	fn open_missing_file_fails() {
		let err = DataReaderFile::open(Path::new("/definitely/not/here.geojson")).unwrap_err();
		assert!(err.to_string().contains("does not exist"));
	}

	#[test]
	fn open_directory_fails() {
		let dir = tempfile::tempdir().unwrap();
		assert!(DataReaderFile::open(dir.path()).is_err());
	}
}
