use crate::PointCloud;

/// The host framework's view of a scene object.
///
/// Only objects that can surrender a [`PointCloud`] may join a
/// [`PointCloudGroup`](crate::PointCloudGroup).
pub trait Mobject {
    /// Short type name used in error messages.
    fn kind(&self) -> &'static str;

    fn into_point_cloud(self: Box<Self>) -> Option<PointCloud>;
}

impl Mobject for PointCloud {
    fn kind(&self) -> &'static str {
        "PointCloud"
    }

    fn into_point_cloud(self: Box<Self>) -> Option<PointCloud> {
        Some(*self)
    }
}
