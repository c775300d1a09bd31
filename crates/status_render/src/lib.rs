pub mod marquee;
pub mod notifications;
pub mod output;
pub mod progress;
pub mod renderer;
pub mod snapshot;

pub use marquee::*;
pub use notifications::*;
pub use output::*;
pub use progress::*;
pub use renderer::*;
pub use snapshot::*;
