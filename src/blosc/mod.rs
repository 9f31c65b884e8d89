pub mod bitshuffle_generic;
pub mod blosc2;
pub mod blosc_private;
pub mod blosclz;
pub mod btune;
pub mod btune_log;
pub mod btune_model;
pub mod btune_types;
pub mod context;
pub mod delta;
pub mod entropy_probe;
pub mod fastcopy;
pub mod shuffle;
pub mod shuffle_generic;
pub mod stune;
pub mod timestamp;
