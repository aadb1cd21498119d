//! ECS компоненты навигации
//!
//! - target: кликабельные области (NavTarget, TargetKind, TargetId)
//! - camera: navigator camera marker + PerspectiveRig для rays из NDC

pub mod camera;
pub mod target;

pub use camera::*;
pub use target::*;
