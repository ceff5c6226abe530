// File: crates/bar-core/src/settings.rs
// Summary: Display-settings collaborator: parse persisted objects from a DataView and enumerate them for a property pane.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::dataview::{DataView, PropertyValue};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("{object}.{property}: expected {expected}, found {found:?}")]
    WrongType {
        object: String,
        property: String,
        expected: &'static str,
        found: PropertyValue,
    },
}

/// Which object the property pane asks about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerateOptions {
    pub object_name: String,
}

impl EnumerateOptions {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self { object_name: object_name.into() }
    }
}

/// One editable object as presented to the property pane.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectInstance {
    pub object_name: String,
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Settings model the renderer holds between updates and forwards to the host.
pub trait VisualSettings: Default + Clone {
    fn parse(view: &DataView) -> Result<Self, SettingsError>;
    fn enumerate_object_instances(&self, options: &EnumerateOptions) -> Vec<ObjectInstance>;
}

pub const DATA_POINT: &str = "dataPoint";

#[derive(Clone, Debug, PartialEq)]
pub struct DataPointSettings {
    pub default_color: String,
    pub show_all_data_points: bool,
    pub fill: String,
    pub fill_rule: String,
    pub font_size: f64,
}

impl Default for DataPointSettings {
    fn default() -> Self {
        Self {
            default_color: String::new(),
            show_all_data_points: true,
            fill: String::new(),
            fill_rule: String::new(),
            font_size: 12.0,
        }
    }
}

/// Default settings model: a single `dataPoint` object.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSettings {
    pub data_point: DataPointSettings,
}

fn wrong_type(property: &str, expected: &'static str, found: &PropertyValue) -> SettingsError {
    SettingsError::WrongType {
        object: DATA_POINT.to_string(),
        property: property.to_string(),
        expected,
        found: found.clone(),
    }
}

fn text(property: &str, v: &PropertyValue) -> Result<String, SettingsError> {
    match v {
        PropertyValue::Text(s) => Ok(s.clone()),
        other => Err(wrong_type(property, "text", other)),
    }
}

fn boolean(property: &str, v: &PropertyValue) -> Result<bool, SettingsError> {
    match v {
        PropertyValue::Bool(b) => Ok(*b),
        other => Err(wrong_type(property, "bool", other)),
    }
}

fn number(property: &str, v: &PropertyValue) -> Result<f64, SettingsError> {
    match v {
        PropertyValue::Number(n) if n.is_finite() => Ok(*n),
        other => Err(wrong_type(property, "finite number", other)),
    }
}

impl VisualSettings for ChartSettings {
    fn parse(view: &DataView) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        let Some(props) = view.metadata.objects.get(DATA_POINT) else {
            return Ok(settings);
        };
        let dp = &mut settings.data_point;
        for (name, value) in props {
            match name.as_str() {
                "defaultColor" => dp.default_color = text(name, value)?,
                "showAllDataPoints" => dp.show_all_data_points = boolean(name, value)?,
                "fill" => dp.fill = text(name, value)?,
                "fillRule" => dp.fill_rule = text(name, value)?,
                "fontSize" => dp.font_size = number(name, value)?,
                other => log::debug!("ignoring unknown property {DATA_POINT}.{other}"),
            }
        }
        Ok(settings)
    }

    fn enumerate_object_instances(&self, options: &EnumerateOptions) -> Vec<ObjectInstance> {
        if options.object_name != DATA_POINT {
            return Vec::new();
        }
        let dp = &self.data_point;
        let properties = BTreeMap::from([
            ("defaultColor".to_string(), PropertyValue::Text(dp.default_color.clone())),
            ("showAllDataPoints".to_string(), PropertyValue::Bool(dp.show_all_data_points)),
            ("fill".to_string(), PropertyValue::Text(dp.fill.clone())),
            ("fillRule".to_string(), PropertyValue::Text(dp.fill_rule.clone())),
            ("fontSize".to_string(), PropertyValue::Number(dp.font_size)),
        ]);
        vec![ObjectInstance { object_name: DATA_POINT.to_string(), properties }]
    }
}
