
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
	#[error("device could not allocate a buffer object")]
	BufferAllocation,

	#[error("device could not allocate a display list")]
	ListAllocation,
}
