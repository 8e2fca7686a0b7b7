use super::Device;
use crate::error::StorageError;
use std::rc::Rc;


#[derive(Debug)]
pub struct BufferHandle {
	device: Rc<dyn Device>,
	name: u32,
}

impl BufferHandle {
	pub fn new(device: &Rc<dyn Device>) -> Result<Self, StorageError> {
		let name = device.gen_buffer();
		if name == 0 {
			return Err(StorageError::BufferAllocation)
		}

		log::debug!("created buffer {name}");

		Ok(BufferHandle {
			device: Rc::clone(device),
			name,
		})
	}

	pub fn name(&self) -> u32 {
		self.name
	}
}

impl Drop for BufferHandle {
	fn drop(&mut self) {
		log::debug!("deleting buffer {}", self.name);
		self.device.delete_buffer(self.name);
	}
}


#[derive(Debug)]
pub struct ListHandle {
	device: Rc<dyn Device>,
	name: u32,
}

impl ListHandle {
	pub fn new(device: &Rc<dyn Device>) -> Result<Self, StorageError> {
		let name = device.gen_list();
		if name == 0 {
			return Err(StorageError::ListAllocation)
		}

		Ok(ListHandle {
			device: Rc::clone(device),
			name,
		})
	}

	pub fn name(&self) -> u32 {
		self.name
	}
}

impl Drop for ListHandle {
	fn drop(&mut self) {
		self.device.delete_list(self.name);
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::device::{DeviceCall, TraceDevice};

	#[test]
	fn buffer_deleted_once_on_drop() {
		let trace = Rc::new(TraceDevice::new());
		let device: Rc<dyn Device> = trace.clone();

		let buffer = BufferHandle::new(&device).unwrap();
		let name = buffer.name();
		drop(buffer);

		assert_eq!(trace.count(|call| *call == DeviceCall::DeleteBuffer(name)), 1);
	}

	#[test]
	fn failed_allocation_is_an_error() {
		let trace = Rc::new(TraceDevice::new());
		trace.fail_allocations(true);
		let device: Rc<dyn Device> = trace.clone();

		assert!(matches!(BufferHandle::new(&device), Err(StorageError::BufferAllocation)));
		assert!(matches!(ListHandle::new(&device), Err(StorageError::ListAllocation)));
		assert_eq!(trace.count(|call| matches!(call, DeviceCall::DeleteBuffer(_) | DeviceCall::DeleteList(_))), 0);
	}
}
