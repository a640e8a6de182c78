// Template context structures for Askama templates.

mod booking;

pub use booking::*;
