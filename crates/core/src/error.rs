/// Errors raised by point cloud operations.
///
/// Every variant is a precondition failure on the caller's input. A failed
/// operation leaves the cloud exactly as it was.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PointCloudError {
    /// A group member is not point-cloud capable.
    #[error("group member {index} has kind `{kind}`, expected a point cloud")]
    TypeMismatch { index: usize, kind: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation needs at least one point.
    #[error("{0} requires a non-empty point cloud")]
    EmptyCloud(&'static str),
}

pub type Result<T, E = PointCloudError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::PointCloudError;

    #[test]
    fn messages_name_the_problem() {
        let err = PointCloudError::TypeMismatch {
            index: 2,
            kind: "Label",
        };
        assert_eq!(
            err.to_string(),
            "group member 2 has kind `Label`, expected a point cloud"
        );
        assert_eq!(
            PointCloudError::EmptyCloud("point_from_proportion").to_string(),
            "point_from_proportion requires a non-empty point cloud"
        );
    }
}
