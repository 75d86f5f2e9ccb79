//! Waardetypes en meta-informatie die tussen host en componenten worden
//! uitgewisseld.

pub mod node;
pub mod value;
