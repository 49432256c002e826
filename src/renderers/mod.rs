pub mod barrier;
pub mod progressive;
pub mod scheduler;
