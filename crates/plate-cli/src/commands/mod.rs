pub mod design;
pub mod edit;
pub mod show;
