use crate::storage::{DrawType, StorageKind};
use serde::{Deserialize, Serialize};
use std::path::Path;


#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
	#[error("failed to read settings: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("failed to serialize settings: {0}")]
	Serialize(#[from] toml::ser::Error),
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
	pub title: String,
	pub width: u32,
	pub height: u32,
}

impl Default for WindowSettings {
	fn default() -> Self {
		WindowSettings {
			title: String::from("viewer"),
			width: 800,
			height: 600,
		}
	}
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
	pub storage: StorageKind,

	pub display_lists: bool,

	pub drawing_mode: DrawType,
	pub window: WindowSettings,
}

impl RenderSettings {
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();

		let contents = match std::fs::read_to_string(path) {
			Ok(contents) => contents,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				log::warn!("{} not found, using default settings", path.display());
				return Ok(Self::default())
			}

			Err(err) => return Err(err.into()),
		};

		Self::from_toml(&contents)
	}

	pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(contents)?)
	}

	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
		let contents = toml::to_string_pretty(self)?;
		std::fs::write(path, contents)?;
		Ok(())
	}
}
