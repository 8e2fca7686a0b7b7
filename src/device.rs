pub mod gl_device;
pub mod handle;
pub mod trace;

pub use self::gl_device::GlDevice;
pub use self::handle::{BufferHandle, ListHandle};
pub use self::trace::{DeviceCall, TraceDevice};

use crate::shader::AlphaBlend;
use glam::{Mat4, Vec4};
use std::fmt;


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum ClientArray {
	Vertex = gl::VERTEX_ARRAY,
	Normal = gl::NORMAL_ARRAY,
	Color = gl::COLOR_ARRAY,
	TexCoord = gl::TEXTURE_COORD_ARRAY,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum BufferTarget {
	Array = gl::ARRAY_BUFFER,
	ElementArray = gl::ELEMENT_ARRAY_BUFFER,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum PrimitiveType {
	Points = gl::POINTS,
	Lines = gl::LINES,
	Triangles = gl::TRIANGLES,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum MatrixMode {
	ModelView = gl::MODELVIEW,
	Projection = gl::PROJECTION,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u32)]
pub enum ComponentType {
	Float = gl::FLOAT,
	UnsignedByte = gl::UNSIGNED_BYTE,
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerSource {
	/// Address in client memory, only valid while the owning array is alive and unmoved.
	Client(*const u8),
	Offset(usize),
}

impl PointerSource {
	pub fn at(self, offset: usize) -> PointerSource {
		match self {
			PointerSource::Client(ptr) => PointerSource::Client(ptr.wrapping_add(offset)),
			PointerSource::Offset(base) => PointerSource::Offset(base + offset),
		}
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ArrayPointer {
	pub components: i32,
	pub component_type: ComponentType,
	pub normalized: bool,
	pub stride: i32,
	pub source: PointerSource,
}

impl ArrayPointer {
	pub fn floats(components: i32, stride: usize, source: PointerSource) -> Self {
		ArrayPointer {
			components,
			component_type: ComponentType::Float,
			normalized: false,
			stride: stride as i32,
			source,
		}
	}

	pub fn bytes(components: i32, stride: usize, source: PointerSource) -> Self {
		ArrayPointer {
			components,
			component_type: ComponentType::UnsignedByte,
			normalized: false,
			stride: stride as i32,
			source,
		}
	}
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndexPointer {
	Client(*const u32),
	Offset(usize),
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Extensions {
	pub multitexture: bool,
	pub vertex_program: bool,
}

impl Extensions {
	pub fn all() -> Self {
		Extensions {
			multitexture: true,
			vertex_program: true,
		}
	}

	pub fn none() -> Self {
		Extensions {
			multitexture: false,
			vertex_program: false,
		}
	}
}


pub trait Device: fmt::Debug {
	fn extensions(&self) -> Extensions;

	fn enable_client_state(&self, array: ClientArray);
	fn disable_client_state(&self, array: ClientArray);
	fn client_active_texture(&self, unit: u32);

	fn vertex_pointer(&self, pointer: ArrayPointer);
	fn normal_pointer(&self, pointer: ArrayPointer);
	fn color_pointer(&self, pointer: ArrayPointer);
	fn tex_coord_pointer(&self, pointer: ArrayPointer);

	fn vertex_attrib_pointer(&self, slot: u32, pointer: ArrayPointer);
	fn enable_vertex_attrib_array(&self, slot: u32);
	fn disable_vertex_attrib_array(&self, slot: u32);

	fn color(&self, rgba: Vec4);
	fn load_matrix(&self, mode: MatrixMode, matrix: &Mat4);
	fn set_alpha_blend(&self, blend: AlphaBlend);

	/// Returns 0 when the driver could not allocate a name.
	fn gen_buffer(&self) -> u32;
	fn delete_buffer(&self, name: u32);
	fn bind_buffer(&self, target: BufferTarget, name: u32);
	fn buffer_data(&self, target: BufferTarget, data: &[u8]);

	/// Returns 0 when the driver could not allocate a list.
	fn gen_list(&self) -> u32;
	fn new_list(&self, list: u32);
	fn end_list(&self);
	fn call_list(&self, list: u32);
	fn delete_list(&self, list: u32);

	fn draw_elements(&self, primitive: PrimitiveType, count: u32, indices: IndexPointer);
}
