pub mod evaluate;
pub mod trainer;
