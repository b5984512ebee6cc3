// Navigation generation: sidebar trees, nav bar, site config assembly

pub mod assemble;
pub mod nav;
pub mod render;
pub mod sidebar;

pub use assemble::{assemble, build_site};
pub use nav::{NavBuilder, nav_links};
pub use render::{OutputFormat, render, write_output};
pub use sidebar::{SidebarBuilder, flatten_links};
