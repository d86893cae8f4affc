pub mod detection;
pub mod imaging;
pub mod marking;
pub mod pipeline;
pub mod shared;
