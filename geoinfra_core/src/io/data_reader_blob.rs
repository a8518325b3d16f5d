use super::DataReaderTrait;
use crate::Blob;
use anyhow::Result;
use async_trait::async_trait;

/// A reader over bytes that are already in memory.
#[derive(Debug)]
pub struct DataReaderBlob {
	blob: Blob,
	name: String,
}

impl DataReaderBlob {
	pub fn new(name: &str, blob: Blob) -> Box<DataReaderBlob> {
		Box::new(DataReaderBlob {
			blob,
			name: name.to_string(),
		})
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderBlob {
	async fn read_all(&self) -> Result<Blob> {
		Ok(self.blob.clone())
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn read_all_returns_copy() -> Result<()> {
		let reader = DataReaderBlob::new("memory", Blob::from("[]"));
		assert_eq!(reader.read_all().await?.to_str()?, "[]");
		assert_eq!(reader.read_all().await?.to_str()?, "[]");
		assert_eq!(reader.get_name(), "memory");
		Ok(())
	}
}
