pub mod central;
pub mod top;
