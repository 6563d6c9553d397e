pub mod chart;
pub mod modal;
pub mod notifications;
pub mod presets;
pub mod settings;
pub mod status;
pub mod watering;
