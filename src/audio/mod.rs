pub mod effects;
pub mod engine;
pub mod params;
pub mod qpixl;
pub mod quantum;
pub mod renderer;
pub mod scale;
pub mod spectral;
pub mod synth;
pub mod wav;
