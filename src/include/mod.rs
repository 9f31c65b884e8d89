pub mod blosc2_include;
pub mod codecs_registry;
pub mod filters_registry;
