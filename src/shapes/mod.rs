// Copyright @yucwang 2023

pub mod csg;
pub mod cube;
pub mod sphere;
