use serde::Serialize;

/// A named activity track members can be enrolled in.
/// Names are unique within an operator's scope.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Program {
    pub id: i64,
    pub name: String,
}
