pub mod attrib;
pub mod bucket;
pub mod device;
pub mod display_array;
pub mod error;
pub mod material;
pub mod mesh;
pub mod rasterizer;
pub mod settings;
pub mod shader;
pub mod storage;
pub mod vertex;

pub use crate::attrib::{Attrib, AttribBindings, AttribRequest, TexCoGen};
pub use crate::bucket::{BucketManager, DisplayArrayBucket, MaterialBucket, MeshSlot};
pub use crate::device::{Device, Extensions, GlDevice, TraceDevice};
pub use crate::display_array::DisplayArray;
pub use crate::error::StorageError;
pub use crate::material::{MaterialFlags, PolyMaterial};
pub use crate::mesh::{MeshObject, ModifiedFlags};
pub use crate::rasterizer::{FrameStats, Rasterizer, ViewState};
pub use crate::settings::{RenderSettings, SettingsError};
pub use crate::shader::{AlphaBlend, MaterialShader};
pub use crate::storage::{DrawType, Storage, StorageInfo, StorageKind};
pub use crate::vertex::{TexVert, MAX_UNIT};
