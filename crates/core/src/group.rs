use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::{Mobject, PointCloud, PointCloudError, Result};

/// A point cloud whose content lives in its children.
///
/// Dereferences to the root [`PointCloud`], so every cloud operation is
/// available and family-wide ones reach all members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloudGroup {
    root: PointCloud,
}

impl PointCloudGroup {
    pub fn new(members: impl IntoIterator<Item = PointCloud>) -> Self {
        let mut root = PointCloud::new();
        for member in members {
            root.add(member);
        }
        Self { root }
    }

    /// Builds a group from arbitrary host objects.
    ///
    /// Fails with [`PointCloudError::TypeMismatch`] naming the first object
    /// that is not a point cloud.
    pub fn try_from_objects(objects: Vec<Box<dyn Mobject>>) -> Result<Self> {
        let mut root = PointCloud::new();
        for (index, object) in objects.into_iter().enumerate() {
            let kind = object.kind();
            match object.into_point_cloud() {
                Some(cloud) => {
                    root.add(cloud);
                }
                None => {
                    warn!(index, kind, "rejected group member");
                    return Err(PointCloudError::TypeMismatch { index, kind });
                }
            }
        }
        Ok(Self { root })
    }
}

impl Deref for PointCloudGroup {
    type Target = PointCloud;

    fn deref(&self) -> &PointCloud {
        &self.root
    }
}

impl DerefMut for PointCloudGroup {
    fn deref_mut(&mut self) -> &mut PointCloud {
        &mut self.root
    }
}

impl Mobject for PointCloudGroup {
    fn kind(&self) -> &'static str {
        "PointCloudGroup"
    }

    fn into_point_cloud(self: Box<Self>) -> Option<PointCloud> {
        Some(self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label;

    impl Mobject for Label {
        fn kind(&self) -> &'static str {
            "Label"
        }

        fn into_point_cloud(self: Box<Self>) -> Option<PointCloud> {
            None
        }
    }

    fn dot(x: f32) -> PointCloud {
        PointCloud::from_points(&[[x, 0.0, 0.0]])
    }

    #[test]
    fn new_adds_members_as_children() {
        let group = PointCloudGroup::new([dot(1.0), dot(2.0)]);
        assert!(group.is_empty());
        assert_eq!(group.children().len(), 2);
        assert_eq!(group.family_members_with_points().len(), 2);
    }

    #[test]
    fn accepts_clouds_and_nested_groups() {
        let inner = PointCloudGroup::new([dot(3.0)]);
        let objects: Vec<Box<dyn Mobject>> = vec![Box::new(dot(1.0)), Box::new(inner)];
        let group = PointCloudGroup::try_from_objects(objects).unwrap();
        assert_eq!(group.family().len(), 4);
    }

    #[test]
    fn rejects_foreign_objects() {
        let objects: Vec<Box<dyn Mobject>> = vec![Box::new(dot(1.0)), Box::new(Label)];
        let err = PointCloudGroup::try_from_objects(objects).unwrap_err();
        assert_eq!(
            err,
            PointCloudError::TypeMismatch {
                index: 1,
                kind: "Label"
            }
        );
    }

    #[test]
    fn operations_reach_members() {
        let mut group = PointCloudGroup::new([
            PointCloud::from_points(&[[2.0, 0.0, 0.0], [0.0, 0.0, 0.0]]),
            PointCloud::from_points(&[[5.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
        ]);
        group.sort_points_by_x();
        assert_eq!(group.children()[0].x(), &[0.0, 2.0]);
        assert_eq!(group.children()[1].x(), &[1.0, 5.0]);

        group.filter_out(|p| p[0] > 1.5);
        group.ingest_submobjects();
        assert_eq!(group.x(), &[0.0, 1.0]);
    }
}
