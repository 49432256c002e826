// Copyright @yucwang 2021

pub mod accumulator;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod marcher;
pub mod progress;
pub mod rng;
pub mod scene;
pub mod sensor;
pub mod settings;
pub mod shape;
