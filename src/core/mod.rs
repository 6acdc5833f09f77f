pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod orbit;
pub mod window;

pub use controller::{Button, Controller, NoInput};
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use orbit::OrbitController;
pub use window::Viewport;
