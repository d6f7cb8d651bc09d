mod linked_box;
mod math;

pub use linked_box::LinkedBox;
pub use math::vec3d::Vec3D;

#[cfg(test)]
mod tests;
