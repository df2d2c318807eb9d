pub mod states;
pub mod params;
pub mod controls;
pub mod forces;
pub mod integrator;
pub mod scenario;
