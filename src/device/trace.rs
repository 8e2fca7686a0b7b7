use super::*;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;


#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
	EnableClientState(ClientArray),
	DisableClientState(ClientArray),
	ClientActiveTexture(u32),

	VertexPointer(ArrayPointer),
	NormalPointer(ArrayPointer),
	ColorPointer(ArrayPointer),
	TexCoordPointer(ArrayPointer),

	VertexAttribPointer(u32, ArrayPointer),
	EnableVertexAttribArray(u32),
	DisableVertexAttribArray(u32),

	Color([f32; 4]),
	LoadMatrix(MatrixMode, [f32; 16]),
	SetAlphaBlend(AlphaBlend),

	GenBuffer(u32),
	DeleteBuffer(u32),
	BindBuffer(BufferTarget, u32),
	BufferData {
		target: BufferTarget,
		buffer: u32,
		size: usize,
	},

	GenList(u32),
	NewList(u32),
	EndList,
	CallList(u32),
	DeleteList(u32),

	DrawElements {
		primitive: PrimitiveType,
		count: u32,
		indices: IndexPointer,
	},
}


#[derive(Debug)]
pub struct TraceDevice {
	extensions: Extensions,
	calls: RefCell<Vec<DeviceCall>>,
	next_name: Cell<u32>,
	bound_buffers: RefCell<HashMap<BufferTarget, u32>>,
	fail_allocations: Cell<bool>,
}

impl TraceDevice {
	pub fn new() -> Self {
		Self::with_extensions(Extensions::all())
	}

	pub fn with_extensions(extensions: Extensions) -> Self {
		TraceDevice {
			extensions,
			calls: RefCell::new(Vec::new()),
			next_name: Cell::new(1),
			bound_buffers: RefCell::new(HashMap::new()),
			fail_allocations: Cell::new(false),
		}
	}

	/// Make subsequent `gen_*` calls return 0, as a driver out of memory would.
	pub fn fail_allocations(&self, fail: bool) {
		self.fail_allocations.set(fail);
	}

	pub fn calls(&self) -> Vec<DeviceCall> {
		self.calls.borrow().clone()
	}

	pub fn take_calls(&self) -> Vec<DeviceCall> {
		std::mem::take(&mut *self.calls.borrow_mut())
	}

	pub fn clear(&self) {
		self.calls.borrow_mut().clear();
	}

	pub fn count(&self, pred: impl Fn(&DeviceCall) -> bool) -> usize {
		self.calls.borrow().iter().filter(|call| pred(call)).count()
	}

	pub fn draw_counts(&self) -> Vec<u32> {
		self.calls.borrow().iter()
			.filter_map(|call| match call {
				DeviceCall::DrawElements { count, .. } => Some(*count),
				_ => None,
			})
			.collect()
	}

	fn push(&self, call: DeviceCall) {
		log::trace!("{call:?}");
		self.calls.borrow_mut().push(call);
	}

	fn allocate_name(&self) -> u32 {
		if self.fail_allocations.get() {
			return 0
		}

		let name = self.next_name.get();
		self.next_name.set(name + 1);
		name
	}
}

impl Default for TraceDevice {
	fn default() -> Self {
		Self::new()
	}
}


impl Device for TraceDevice {
	fn extensions(&self) -> Extensions {
		self.extensions
	}

	fn enable_client_state(&self, array: ClientArray) {
		self.push(DeviceCall::EnableClientState(array));
	}

	fn disable_client_state(&self, array: ClientArray) {
		self.push(DeviceCall::DisableClientState(array));
	}

	fn client_active_texture(&self, unit: u32) {
		self.push(DeviceCall::ClientActiveTexture(unit));
	}

	fn vertex_pointer(&self, pointer: ArrayPointer) {
		self.push(DeviceCall::VertexPointer(pointer));
	}

	fn normal_pointer(&self, pointer: ArrayPointer) {
		self.push(DeviceCall::NormalPointer(pointer));
	}

	fn color_pointer(&self, pointer: ArrayPointer) {
		self.push(DeviceCall::ColorPointer(pointer));
	}

	fn tex_coord_pointer(&self, pointer: ArrayPointer) {
		self.push(DeviceCall::TexCoordPointer(pointer));
	}

	fn vertex_attrib_pointer(&self, slot: u32, pointer: ArrayPointer) {
		self.push(DeviceCall::VertexAttribPointer(slot, pointer));
	}

	fn enable_vertex_attrib_array(&self, slot: u32) {
		self.push(DeviceCall::EnableVertexAttribArray(slot));
	}

	fn disable_vertex_attrib_array(&self, slot: u32) {
		self.push(DeviceCall::DisableVertexAttribArray(slot));
	}

	fn color(&self, rgba: Vec4) {
		self.push(DeviceCall::Color(rgba.to_array()));
	}

	fn load_matrix(&self, mode: MatrixMode, matrix: &Mat4) {
		self.push(DeviceCall::LoadMatrix(mode, matrix.to_cols_array()));
	}

	fn set_alpha_blend(&self, blend: AlphaBlend) {
		self.push(DeviceCall::SetAlphaBlend(blend));
	}

	fn gen_buffer(&self) -> u32 {
		let name = self.allocate_name();
		self.push(DeviceCall::GenBuffer(name));
		name
	}

	fn delete_buffer(&self, name: u32) {
		self.bound_buffers.borrow_mut().retain(|_, bound| *bound != name);
		self.push(DeviceCall::DeleteBuffer(name));
	}

	fn bind_buffer(&self, target: BufferTarget, name: u32) {
		self.bound_buffers.borrow_mut().insert(target, name);
		self.push(DeviceCall::BindBuffer(target, name));
	}

	fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
		let buffer = self.bound_buffers.borrow().get(&target).copied().unwrap_or(0);
		self.push(DeviceCall::BufferData { target, buffer, size: data.len() });
	}

	fn gen_list(&self) -> u32 {
		let name = self.allocate_name();
		self.push(DeviceCall::GenList(name));
		name
	}

	fn new_list(&self, list: u32) {
		self.push(DeviceCall::NewList(list));
	}

	fn end_list(&self) {
		self.push(DeviceCall::EndList);
	}

	fn call_list(&self, list: u32) {
		self.push(DeviceCall::CallList(list));
	}

	fn delete_list(&self, list: u32) {
		self.push(DeviceCall::DeleteList(list));
	}

	fn draw_elements(&self, primitive: PrimitiveType, count: u32, indices: IndexPointer) {
		self.push(DeviceCall::DrawElements { primitive, count, indices });
	}
}
