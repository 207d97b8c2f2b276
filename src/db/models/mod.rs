mod user;
mod section;
mod enrollment;
mod requirement_type;
mod document;
mod history_entry;
mod internship_form;
mod company;

#[allow(unused)]
pub use user::*;
#[allow(unused)]
pub use section::*;
#[allow(unused)]
pub use enrollment::*;
#[allow(unused)]
pub use requirement_type::*;
#[allow(unused)]
pub use document::*;
#[allow(unused)]
pub use history_entry::*;
#[allow(unused)]
pub use internship_form::*;
#[allow(unused)]
pub use company::*;
