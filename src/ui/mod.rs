pub mod app;
pub mod card;
pub mod header;
pub mod icons;
pub mod navigation;
pub mod tech_animation;
pub mod util;
