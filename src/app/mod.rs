//! Shell controller: state, event handling, and action dispatch.

pub mod action;
pub mod back_press;
pub mod commands;
pub mod event;
pub mod handler;
pub mod navigation;
pub mod state;
