mod editor;
mod errors;
mod forms;
mod handlers;

pub(crate) use handlers::*;
