pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod fusion;
pub mod permission;
pub mod signal;
pub mod input {
    pub mod motion;
    pub mod orientation;
    pub mod pointer;
}
pub mod processing {
    pub mod color;
    pub mod kernel;
}
