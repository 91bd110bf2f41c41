// Portfolio rendering: ResumeRecord → HTML through compiled, auto-escaping templates.

pub mod renderer;

pub use renderer::{PortfolioRenderer, RenderError};
