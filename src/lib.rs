pub mod app;
pub mod markup;
pub mod navigation;
pub mod presentation;
pub mod rules;
pub mod shared;
pub mod validation;
