pub mod block;
pub mod object;
