#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod color;
pub mod config;
pub mod error;
pub mod family;
pub mod group;
pub mod hooks;
pub mod point;
pub mod resample;
pub mod traits;

pub use bbox::Aabb;
pub use cloud::{PointCloud, PointColors};
pub use color::{color_gradient, color_to_rgba, interpolate_color, Color, Rgba};
pub use config::CloudConfig;
pub use error::{PointCloudError, Result};
pub use group::PointCloudGroup;
pub use hooks::{Mutation, MutationHook};
pub use point::ColoredPoint;
pub use resample::{resize_preserving_order, resize_with_interpolation};
pub use traits::Mobject;
