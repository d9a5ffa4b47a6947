//! Application services for the administrative surface.

pub mod audit;
pub mod chrome;
pub mod contents;
pub mod courses;
pub mod modules;
pub mod ordering;

pub use contents::AdminContentService;
pub use courses::AdminCourseService;
pub use modules::AdminModuleService;
pub use ordering::AdminOrderingService;
