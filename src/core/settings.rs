// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::integrators::path::PathIntegrator;
use crate::io::saver::{ImageFormat, ImageSaver};
use crate::math::constants::{Float, Vector3f};
use crate::renderers::progressive::RenderSettings;
use crate::sensors::pinhole::PinholeCamera;

#[derive(Debug)]
pub enum SettingsLoadError {
    Io(std::io::Error),
    Parse(String),
    InvalidValue { name: String, value: String },
}

impl From<std::io::Error> for SettingsLoadError {
    fn from(err: std::io::Error) -> Self {
        SettingsLoadError::Io(err)
    }
}

impl fmt::Display for SettingsLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SettingsLoadError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsLoadError::Parse(msg) => write!(f, "malformed settings: {}", msg),
            SettingsLoadError::InvalidValue { name, value } =>
                write!(f, "invalid value '{}' for setting '{}'", value, name),
        }
    }
}

impl std::error::Error for SettingsLoadError {}

/// Everything needed to set up one render run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub render: RenderSettings,
    pub scene: String,
    pub camera_position: Vector3f,
    pub camera_direction: Vector3f,
    pub camera_up: Vector3f,
    pub screen_height: Float,
    pub screen_distance: Float,
    pub save_on_each_sample: bool,
    pub next_event_estimation: bool,
    /// Panorama replacing the scene background, if any.
    pub environment_map: Option<PathBuf>,
    pub environment_scale: Float,
    /// Period of the background saver, `None` when disabled.
    pub save_span: Option<Duration>,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub output_format: ImageFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            render: RenderSettings::default(),
            scene: String::from("cornell_box"),
            camera_position: Vector3f::new(0.0, 0.0, 3.4),
            camera_direction: Vector3f::new(0.0, 0.0, -1.0),
            camera_up: Vector3f::new(0.0, 1.0, 0.0),
            screen_height: 1.0,
            screen_distance: 1.2,
            save_on_each_sample: true,
            next_event_estimation: false,
            environment_map: None,
            environment_scale: 1.0,
            save_span: None,
            output_dir: PathBuf::from("output"),
            output_prefix: String::from("image"),
            output_format: ImageFormat::Png,
        }
    }
}

impl Settings {
    pub fn camera(&self) -> PinholeCamera {
        PinholeCamera::new(self.width, self.height,
                           self.camera_position, self.camera_direction, self.camera_up,
                           self.screen_height, self.screen_distance)
    }

    pub fn integrator(&self) -> PathIntegrator {
        PathIntegrator::default().with_next_event_estimation(self.next_event_estimation)
    }

    pub fn saver(&self) -> ImageSaver {
        ImageSaver::new(&self.output_dir, &self.output_prefix, self.output_format)
    }
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, SettingsLoadError> {
    let xml = fs::read_to_string(path.as_ref())?;
    parse_settings(&xml)
}

/// Parses a `<settings>` document of `<integer|float|string|boolean|vector
/// name=".." value=".."/>` entries. `<default name value>` entries are
/// substituted for `$name` in later values. Unknown names are ignored.
pub fn parse_settings(xml: &str) -> Result<Settings, SettingsLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut values: HashMap<String, String> = HashMap::new();
    let mut in_settings = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.name().as_ref() {
                    b"settings" => in_settings = true,
                    tag @ (b"default" | b"integer" | b"float" | b"string" | b"boolean" | b"vector") => {
                        let mut key: Option<String> = None;
                        let mut value: Option<String> = None;
                        for attr in e.attributes().flatten() {
                            let text = attr.unescape_value()
                                .map_err(|err| SettingsLoadError::Parse(err.to_string()))?
                                .to_string();
                            match attr.key.as_ref() {
                                b"name" => key = Some(text),
                                b"value" => value = Some(text),
                                _ => {}
                            }
                        }

                        let (key, value) = match (key, value) {
                            (Some(k), Some(v)) => (k, v),
                            _ => {
                                return Err(SettingsLoadError::Parse(format!(
                                    "<{}> needs both name and value", String::from_utf8_lossy(tag))));
                            }
                        };
                        if tag == b"default" {
                            defaults.insert(key, value);
                        } else if in_settings {
                            values.insert(key, resolve_value(&value, &defaults));
                        }
                    }
                    other => {
                        return Err(SettingsLoadError::Parse(format!(
                            "unexpected element <{}>", String::from_utf8_lossy(other))));
                    }
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"settings" {
                    in_settings = false;
                }
            }
            Ok(_) => {}
            Err(e) => return Err(SettingsLoadError::Parse(e.to_string())),
        }
        buf.clear();
    }

    build_settings(&values)
}

fn build_settings(values: &HashMap<String, String>) -> Result<Settings, SettingsLoadError> {
    let mut settings = Settings::default();

    for (name, value) in values {
        match name.as_str() {
            "width" => settings.width = parse_number(name, value)?,
            "height" => settings.height = parse_number(name, value)?,
            "sample_start" => settings.render.min_samples = parse_number(name, value)?,
            "sample_end" => settings.render.max_samples = parse_number(name, value)?,
            "sample_step" => settings.render.step = parse_number(name, value)?,
            "supersamples" => settings.render.supersamples = parse_number(name, value)?,
            "threads" => settings.render.threads = parse_number(name, value)?,
            "seed" => settings.render.seed = parse_number(name, value)?,
            "show_progress" => settings.render.show_progress = parse_bool(name, value)?,
            "scene" => settings.scene = value.clone(),
            "camera_position" => settings.camera_position = parse_vec3(name, value)?,
            "camera_direction" => settings.camera_direction = parse_vec3(name, value)?,
            "camera_up" => settings.camera_up = parse_vec3(name, value)?,
            "screen_height" => settings.screen_height = parse_number(name, value)?,
            "screen_distance" => settings.screen_distance = parse_number(name, value)?,
            "save_on_each_sample" => settings.save_on_each_sample = parse_bool(name, value)?,
            "save_span" => {
                let seconds: f64 = parse_number(name, value)?;
                if !seconds.is_finite() || seconds < 0.0 {
                    return Err(invalid(name, value));
                }
                settings.save_span = if seconds > 0.0 {
                    Some(Duration::try_from_secs_f64(seconds).map_err(|_| invalid(name, value))?)
                } else {
                    None
                };
            }
            "next_event_estimation" => settings.next_event_estimation = parse_bool(name, value)?,
            "environment_map" => {
                settings.environment_map = if value.trim().is_empty() { None } else { Some(PathBuf::from(value)) };
            }
            "environment_scale" => settings.environment_scale = parse_number(name, value)?,
            "output_dir" => settings.output_dir = PathBuf::from(value),
            "output_prefix" => settings.output_prefix = value.clone(),
            "output_format" => {
                settings.output_format = ImageFormat::from_name(value).ok_or_else(|| invalid(name, value))?;
            }
            _ => log::warn!("Ignoring unknown setting '{}'.", name),
        }
    }

    validate_camera(&settings)?;
    if !settings.environment_scale.is_finite() || settings.environment_scale < 0.0 {
        return Err(invalid("environment_scale", &settings.environment_scale.to_string()));
    }
    Ok(settings)
}

// The camera basis is built from direction x up, so both must be usable
// vectors and must not be parallel.
fn validate_camera(settings: &Settings) -> Result<(), SettingsLoadError> {
    let usable = |v: &Vector3f| v.iter().all(|c| c.is_finite()) && v.norm() > 1e-6;
    if !settings.camera_position.iter().all(|c| c.is_finite()) {
        return Err(invalid("camera_position", &format_vec3(&settings.camera_position)));
    }
    if !usable(&settings.camera_direction) {
        return Err(invalid("camera_direction", &format_vec3(&settings.camera_direction)));
    }
    if !usable(&settings.camera_up)
        || settings.camera_direction.normalize().cross(&settings.camera_up.normalize()).norm() < 1e-4 {
        return Err(invalid("camera_up", &format_vec3(&settings.camera_up)));
    }
    for (name, value) in [("screen_height", settings.screen_height), ("screen_distance", settings.screen_distance)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(name, &value.to_string()));
        }
    }
    Ok(())
}

fn format_vec3(v: &Vector3f) -> String {
    format!("{}, {}, {}", v.x, v.y, v.z)
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn invalid(name: &str, value: &str) -> SettingsLoadError {
    SettingsLoadError::InvalidValue { name: name.to_string(), value: value.to_string() }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SettingsLoadError> {
    value.trim().parse::<T>().map_err(|_| invalid(name, value))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, SettingsLoadError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn parse_vec3(name: &str, value: &str) -> Result<Vector3f, SettingsLoadError> {
    let parts: Vec<&str> = value.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(invalid(name, value));
    }
    Ok(Vector3f::new(parse_number(name, parts[0])?,
                     parse_number(name, parts[1])?,
                     parse_number(name, parts[2])?))
}
