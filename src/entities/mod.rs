pub mod cultivation_season;
pub mod field;
pub mod saved_template;
pub mod user;
pub mod work_order;
