pub mod clustering;
pub mod cover;
pub mod distant;
pub mod enclosing;
pub mod interval;
pub mod union_find;
