// File: crates/bar-core/src/lib.rs
// Summary: Core library entry point; exports the converter, scales, surface model and bar chart renderer.

pub mod chart;
pub mod convert;
pub mod axis;
pub mod ticks;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod dataview;
pub mod settings;
pub mod surface;
pub mod join;
pub mod svg;

pub use chart::{BarChart, ChartOptions, UpdateStats};
pub use convert::{convert, ConvertError, Record};
pub use axis::{Axis, Orient};
pub use dataview::{Cell, DataView, PropertyValue, UpdateOptions};
pub use geometry::{PlotArea, Viewport};
pub use scale::{BandScale, ValueScale};
pub use settings::{ChartSettings, EnumerateOptions, VisualSettings};
pub use surface::{AttrValue, NodeId, Scene, Surface, Tag, Transform};
pub use join::{diff, Diff, ElementSet, Phase};
pub use types::{Margins, RedrawPolicy};
