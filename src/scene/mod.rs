pub mod element;
pub mod formula;
pub mod model;
pub mod step;
pub mod timeline;
pub mod tree;
