pub mod money;
pub mod row_order;
