//! Element construction from declarative attributes.

use crate::host::{HostResult, HostSurface, NodeId};
use crate::model::element::{AttributeAssignment, ElementAttributes};

/// Creates a detached `tag` element with `attributes` applied.
///
/// # Errors
/// - Propagates host failures, e.g. `HostError::InvalidTagName`.
pub fn create_element<H>(host: &H, tag: &str, attributes: &ElementAttributes) -> HostResult<NodeId>
where
    H: HostSurface + ?Sized,
{
    let node = host.create_element(tag)?;
    for assignment in attributes.assignments() {
        match assignment {
            AttributeAssignment::Text(text) => host.set_text(node, text)?,
            AttributeAssignment::ClassName(class_name) => host.set_class_name(node, class_name)?,
            AttributeAssignment::Generic { name, value } => host.set_attribute(node, name, value)?,
        }
    }
    Ok(node)
}
