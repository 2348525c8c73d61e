pub mod headful;
pub mod input;
pub mod menu;
pub mod puck;
pub mod scene;
pub mod settings;
pub mod sfx;
pub mod state;
pub mod view;
