use crate::error::{RasterError, Result};
use crate::io::render_settings::{RasterizerConfig, ResolveMode};
use log::info;
use std::path::Path;
use toml::Value;

/// TOML configuration manager, reads and writes [`RasterizerConfig`].
///
/// Layout:
///
/// ```toml
/// [frame]
/// width = 700
/// height = 700
///
/// [depth]
/// near = 0.1
/// far = 50.0
///
/// [msaa]
/// resolve = "incremental"
/// ```
///
/// Missing sections and keys keep their defaults.
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// Loads a configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RasterizerConfig> {
        let path = path.as_ref();
        info!("Loading rasterizer config: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| RasterError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;

        Self::load_from_content(&content)
    }

    /// Loads a configuration from a TOML string
    pub fn load_from_content(content: &str) -> Result<RasterizerConfig> {
        let toml_value: Value = toml::from_str(content)?;
        let config = Self::parse_toml_to_config(&toml_value)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves a configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(config: &RasterizerConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, Self::to_toml_string(config)).map_err(|source| {
            RasterError::ConfigIo {
                path: path.display().to_string(),
                source,
            }
        })?;
        info!("Saved rasterizer config to {:?}", path);
        Ok(())
    }

    // ===== TOML -> RasterizerConfig =====

    fn parse_toml_to_config(toml: &Value) -> Result<RasterizerConfig> {
        let mut config = RasterizerConfig::default();

        if let Some(frame) = toml.get("frame").and_then(|v| v.as_table()) {
            Self::parse_frame_section(&mut config, frame)?;
        }

        if let Some(depth) = toml.get("depth").and_then(|v| v.as_table()) {
            Self::parse_depth_section(&mut config, depth)?;
        }

        if let Some(msaa) = toml.get("msaa").and_then(|v| v.as_table()) {
            Self::parse_msaa_section(&mut config, msaa)?;
        }

        Ok(config)
    }

    fn parse_frame_section(config: &mut RasterizerConfig, frame: &toml::Table) -> Result<()> {
        if let Some(width) = frame.get("width") {
            config.width = Self::parse_dimension("frame.width", width)?;
        }
        if let Some(height) = frame.get("height") {
            config.height = Self::parse_dimension("frame.height", height)?;
        }
        Ok(())
    }

    fn parse_depth_section(config: &mut RasterizerConfig, depth: &toml::Table) -> Result<()> {
        if let Some(near) = depth.get("near") {
            config.near = Self::parse_float("depth.near", near)?;
        }
        if let Some(far) = depth.get("far") {
            config.far = Self::parse_float("depth.far", far)?;
        }
        Ok(())
    }

    fn parse_msaa_section(config: &mut RasterizerConfig, msaa: &toml::Table) -> Result<()> {
        if let Some(resolve) = msaa.get("resolve") {
            let name = resolve.as_str().ok_or_else(|| {
                RasterError::InvalidConfig(format!("msaa.resolve must be a string, got {}", resolve))
            })?;
            config.resolve = name.parse::<ResolveMode>()?;
        }
        Ok(())
    }

    fn parse_dimension(key: &str, value: &Value) -> Result<usize> {
        value
            .as_integer()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                RasterError::InvalidConfig(format!(
                    "{} must be a non-negative integer, got {}",
                    key, value
                ))
            })
    }

    /// Accepts both `50` and `50.0`.
    fn parse_float(key: &str, value: &Value) -> Result<f32> {
        match value {
            Value::Float(f) => Ok(*f as f32),
            Value::Integer(i) => Ok(*i as f32),
            _ => Err(RasterError::InvalidConfig(format!(
                "{} must be a number, got {}",
                key, value
            ))),
        }
    }

    // ===== RasterizerConfig -> TOML =====

    pub fn to_toml_string(config: &RasterizerConfig) -> String {
        let mut content = String::new();

        content.push_str("# Rasterizer configuration\n\n");

        content.push_str("[frame]\n");
        content.push_str(&format!("width = {}\n", config.width));
        content.push_str(&format!("height = {}\n", config.height));
        content.push('\n');

        content.push_str("[depth]\n");
        content.push_str(&format!("near = {:?}\n", config.near));
        content.push_str(&format!("far = {:?}\n", config.far));
        content.push('\n');

        content.push_str("[msaa]\n");
        content.push_str(&format!("resolve = \"{}\"  # incremental | deferred\n", config.resolve));

        content
    }
}
