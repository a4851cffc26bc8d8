pub mod crop_grow_system;

pub use crop_grow_system::CropGrowSystem;
