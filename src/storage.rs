pub mod va;
pub mod vbo;

pub use self::va::{DisplayList, ListType, StorageVa};
pub use self::vbo::{StorageVbo, Vbo};

use crate::attrib::AttribBindings;
use crate::bucket::DisplayArrayBucket;
use crate::device::Device;
use crate::error::StorageError;
use crate::material::PolyMaterial;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
	VertexArray,
	#[default]
	BufferObject,
}


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawType {
	BoundingBox = 0,
	Wireframe,
	Solid,
	Shadow,
	#[default]
	Textured,
}

pub const DRAW_MAX: usize = 5;

impl DrawType {
	pub const ALL: [DrawType; DRAW_MAX] = [
		DrawType::BoundingBox,
		DrawType::Wireframe,
		DrawType::Solid,
		DrawType::Shadow,
		DrawType::Textured,
	];

	pub fn index(self) -> usize {
		self as usize
	}

	pub fn is_wireframe(self) -> bool {
		self <= DrawType::Wireframe
	}
}


#[derive(Debug)]
pub enum StorageInfo {
	DisplayList(DisplayList),
	Vbo(Vbo),
}

impl StorageInfo {
	pub fn kind(&self) -> StorageKind {
		match self {
			StorageInfo::DisplayList(_) => StorageKind::VertexArray,
			StorageInfo::Vbo(_) => StorageKind::BufferObject,
		}
	}

	pub fn kind_name(&self) -> &'static str {
		match self {
			StorageInfo::DisplayList(_) => "display list",
			StorageInfo::Vbo(_) => "vbo",
		}
	}
}


pub trait Storage: fmt::Debug {
	fn kind(&self) -> StorageKind;

	fn drawing_mode(&self) -> DrawType;
	fn set_drawing_mode(&mut self, mode: DrawType);

	fn bind_primitives(&mut self, bucket: &mut DisplayArrayBucket, material: &PolyMaterial,
		bindings: &mut AttribBindings) -> Result<(), StorageError>;

	fn unbind_primitives(&mut self, bucket: &mut DisplayArrayBucket, material: &PolyMaterial,
		bindings: &mut AttribBindings) -> Result<(), StorageError>;

	fn index_primitives(&mut self, bucket: &mut DisplayArrayBucket, slot: usize,
		material: &PolyMaterial) -> Result<(), StorageError>;
}

pub fn create_storage(kind: StorageKind, device: Rc<dyn Device>, mode: DrawType) -> Box<dyn Storage> {
	let mut storage: Box<dyn Storage> = match kind {
		StorageKind::VertexArray => Box::new(StorageVa::new(device)),
		StorageKind::BufferObject => Box::new(StorageVbo::new(device)),
	};

	storage.set_drawing_mode(mode);
	storage
}
