//! Structural elements module

mod dof;
mod element;
mod material;
mod node;
mod section;
mod support;

pub use dof::{Dof, DofSet, End};
pub use element::{Element, ElementKind, MemberReleases};
pub use material::Material;
pub use node::Node;
pub use section::Section;
pub use support::Support;
