// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blockdoku command-line support: board rendering and headless autoplay

pub mod autoplay;
pub mod render;
