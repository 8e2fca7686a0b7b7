mod common;

use common::*;
use gl_rasterizer::device::DeviceCall;
use gl_rasterizer::shader::MaterialShader;
use gl_rasterizer::*;
use glam::{Mat4, Vec4};
use std::rc::Rc;


#[test]
fn failed_compile_is_a_silent_skip() {
	let log = Default::default();
	let host = FakeHost { fails: true, log, ..Default::default() };
	let material = PolyMaterial::new("Broken")
		.with_shader(MaterialShader::new(Some(Rc::new(host)), uv_names(), 1));

	let mut scene = Scene::new(RenderSettings::default(), material, strip(1));
	let stats = scene.render();

	assert!(scene.trace.calls().is_empty());
	assert_eq!(stats.materials_skipped, 1);
	assert_eq!(stats.slots_drawn, 0);
}


#[test]
fn null_material_is_not_ready() {
	let mut shader = MaterialShader::new(None, uv_names(), 1);

	assert!(!shader.is_ready());
	assert!(!shader.bind(true, 0.0, &ViewState::default()));
	assert!(!shader.update(&MeshSlot::new(Mat4::IDENTITY)));
	assert!(shader.attrib_list().is_empty());
}


#[test]
fn program_sees_view_and_object_uniforms() {
	let host = FakeHost::default();
	let log = host.log.clone();
	let material = PolyMaterial::new("Shaded")
		.with_shader(MaterialShader::new(Some(Rc::new(host)), uv_names(), 3));

	let mut scene = Scene::new(RenderSettings::default(), material, strip(1));
	let view = Mat4::from_translation(glam::Vec3::new(0.0, -1.0, -4.0));
	scene.rasterizer.set_view_matrix(view, 5);
	scene.rasterizer.set_time(2.5);
	scene.array_bucket().slot_mut(0).color = Vec4::new(1.0, 0.5, 0.25, 1.0);

	scene.render();

	let log = log.borrow();
	assert_eq!(log.binds.len(), 1);
	assert_eq!(log.unbinds, 1);

	let bind = log.binds[0];
	assert_eq!(bind.view, view.to_cols_array());
	assert_eq!(bind.view_inv, view.inverse().to_cols_array());
	assert_eq!(bind.light_layer, 3);
	assert_eq!(bind.scene_layers, 5);
	assert_eq!(bind.time, 2.5);

	assert_eq!(log.uniforms.len(), 1);
	assert_eq!(log.uniforms[0].color, [1.0, 0.5, 0.25, 1.0]);
	assert_eq!(log.uniforms[0].model, Mat4::IDENTITY.to_cols_array());
}


#[test]
fn blend_mode_follows_object_alpha() {
	let material = PolyMaterial::new("Shaded")
		.with_shader(MaterialShader::new(Some(Rc::new(FakeHost::default())), uv_names(), 1));

	let mut scene = Scene::new(RenderSettings::default(), material, strip(1));
	scene.array_bucket().add_slot(MeshSlot::new(Mat4::IDENTITY));
	scene.array_bucket().slot_mut(1).color = Vec4::new(1.0, 1.0, 1.0, 0.5);

	scene.render();

	let blends: Vec<_> = scene.trace.calls().into_iter()
		.filter_map(|c| match c {
			DeviceCall::SetAlphaBlend(blend) => Some(blend),
			_ => None,
		})
		.collect();

	assert_eq!(blends, vec![AlphaBlend::Solid, AlphaBlend::Alpha]);
}


#[test]
fn reloading_material_drops_storage() {
	let material = PolyMaterial::new("Shaded")
		.with_shader(MaterialShader::new(Some(Rc::new(FakeHost::default())), uv_names(), 1));

	let mut scene = Scene::new(RenderSettings::default(), material, strip(1));
	scene.render();
	assert!(scene.array_bucket().storage_info().is_some());

	scene.buckets.bucket_mut(0).reload_material();

	assert!(scene.array_bucket().storage_info().is_none());
	assert_eq!(scene.trace.count(|c| matches!(c, DeviceCall::DeleteBuffer(_))), 2);
}
