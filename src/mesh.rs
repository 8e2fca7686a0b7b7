use bitflags::bitflags;
use std::cell::Cell;


bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ModifiedFlags: u16 {
		const POSITION = 1 << 0;
		const NORMAL = 1 << 1;
		const UVS = 1 << 2;
		const COLORS = 1 << 3;
		const TANGENT = 1 << 4;

		const AABB = Self::POSITION.bits();
		const MESH = Self::POSITION.bits() | Self::NORMAL.bits() | Self::UVS.bits()
			| Self::COLORS.bits() | Self::TANGENT.bits();
	}
}


#[derive(Debug, Default)]
pub struct MeshObject {
	name: String,
	modified: Cell<ModifiedFlags>,
}

impl MeshObject {
	pub fn new(name: impl Into<String>) -> Self {
		MeshObject {
			name: name.into(),
			modified: Cell::new(ModifiedFlags::empty()),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn modified_flag(&self) -> ModifiedFlags {
		self.modified.get()
	}

	pub fn append_modified_flag(&self, flag: ModifiedFlags) {
		self.modified.set(self.modified.get() | flag);
	}

	pub fn set_modified_flag(&self, flag: ModifiedFlags) {
		self.modified.set(flag);
	}

	pub fn is_modified(&self) -> bool {
		!self.modified.get().is_empty()
	}
}
