use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use std::mem::{offset_of, size_of};


pub const MAX_UNIT: usize = 8;


#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexVert {
	pub xyz: [f32; 3],
	pub normal: [f32; 3],
	pub tangent: [f32; 4],
	pub rgba: [u8; 4],
	pub uvs: [[f32; 2]; MAX_UNIT],
}

impl TexVert {
	pub fn new(xyz: Vec3, normal: Vec3, tangent: Vec4, rgba: [u8; 4], uvs: &[Vec2]) -> Self {
		debug_assert!(uvs.len() <= MAX_UNIT, "too many uv layers: {}", uvs.len());

		let mut vert = TexVert {
			xyz: xyz.to_array(),
			normal: normal.to_array(),
			tangent: tangent.to_array(),
			rgba,
			uvs: [[0.0; 2]; MAX_UNIT],
		};

		for (dst, uv) in vert.uvs.iter_mut().zip(uvs) {
			*dst = uv.to_array();
		}

		vert
	}

	pub fn xyz(&self) -> Vec3 {
		Vec3::from_array(self.xyz)
	}

	pub fn set_xyz(&mut self, xyz: Vec3) {
		self.xyz = xyz.to_array();
	}

	pub fn normal(&self) -> Vec3 {
		Vec3::from_array(self.normal)
	}

	pub fn set_normal(&mut self, normal: Vec3) {
		self.normal = normal.to_array();
	}

	pub fn uv(&self, layer: usize) -> Vec2 {
		Vec2::from_array(self.uvs[layer])
	}

	pub fn set_uv(&mut self, layer: usize, uv: Vec2) {
		self.uvs[layer] = uv.to_array();
	}

	pub fn set_rgba(&mut self, rgba: [u8; 4]) {
		self.rgba = rgba;
	}
}


/// Byte offsets of every [`TexVert`] field, fixed at compile time.
///
/// Bump `version` whenever the field order or types of [`TexVert`] change, anything
/// that caches data derived from the layout keys off it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
	pub version: u32,
	pub stride: usize,
	pub position: usize,
	pub normal: usize,
	pub tangent: usize,
	pub color: usize,
	pub uv: usize,
}

pub const TEX_VERT_LAYOUT: VertexLayout = VertexLayout {
	version: 1,
	stride: size_of::<TexVert>(),
	position: offset_of!(TexVert, xyz),
	normal: offset_of!(TexVert, normal),
	tangent: offset_of!(TexVert, tangent),
	color: offset_of!(TexVert, rgba),
	uv: offset_of!(TexVert, uvs),
};

impl VertexLayout {
	pub fn uv_layer(&self, layer: usize) -> usize {
		debug_assert!(layer < MAX_UNIT, "uv layer {layer} out of range");
		self.uv + layer * size_of::<[f32; 2]>()
	}
}
