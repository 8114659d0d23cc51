pub mod badges;
pub mod handlers;
pub mod points;
