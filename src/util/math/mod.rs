pub(crate) mod vec3d;
